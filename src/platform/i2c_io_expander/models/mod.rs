pub mod pca9554;
