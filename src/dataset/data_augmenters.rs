pub mod image_augmentations;
