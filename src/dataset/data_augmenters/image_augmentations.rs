use crate::dataset::transforms::ImageTransform;
use image::DynamicImage;
use rand::{thread_rng, Rng};
use std::sync::Arc;

// Reasonable values are -30 and +30, max is 255, min is 0
/// Panics if `min > max`
pub fn random_change_brightness(img: &DynamicImage, min: i32, max: i32) -> DynamicImage {
    let value = thread_rng().gen_range(min..=max);
    img.brighten(value)
}

// Reasonable values are -10 and +10
/// Panics if `min > max`
pub fn random_change_contrast(img: &DynamicImage, min: f32, max: f32) -> DynamicImage {
    let value = thread_rng().gen_range(min..=max);
    img.adjust_contrast(value)
}

/// Mirrors with probability `prob`, panics unless `0 <= prob <= 1`
pub fn random_horizontal_flip(img: DynamicImage, prob: f64) -> DynamicImage {
    if thread_rng().gen_bool(prob) {
        img.fliph()
    } else {
        img
    }
}

/// Usual training-time jitter for landmark photos: mirror half the time,
/// then nudge brightness and contrast.
pub fn default_augmentation() -> ImageTransform<DynamicImage> {
    Arc::new(|img: DynamicImage| {
        let img = random_horizontal_flip(img, 0.5);
        let img = random_change_brightness(&img, -30, 30);
        random_change_contrast(&img, -10., 10.)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn gray(value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([value; 3])))
    }

    #[test]
    fn degenerate_ranges_are_deterministic() {
        let brighter = random_change_brightness(&gray(100), 20, 20);
        assert_eq!(brighter.to_rgb8().get_pixel(0, 0), &Rgb([120; 3]));
        let darker = random_change_brightness(&gray(100), -120, -120);
        assert_eq!(darker.to_rgb8().get_pixel(2, 1), &Rgb([0; 3]));
    }

    #[test]
    fn flip_probability_extremes() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([0; 3]));
        img.put_pixel(0, 0, Rgb([255; 3]));
        let img = DynamicImage::ImageRgb8(img);
        let flipped = random_horizontal_flip(img.clone(), 1.0);
        assert_eq!(flipped.to_rgb8().get_pixel(1, 0), &Rgb([255; 3]));
        let kept = random_horizontal_flip(img, 0.0);
        assert_eq!(kept.to_rgb8().get_pixel(0, 0), &Rgb([255; 3]));
    }

    #[test]
    #[should_panic]
    fn inverted_brightness_range_panics() {
        random_change_brightness(&gray(100), 10, -10);
    }

    #[test]
    #[should_panic]
    fn flip_probability_above_one_panics() {
        random_horizontal_flip(gray(100), 1.5);
    }

    #[test]
    fn default_augmentation_keeps_dimensions() {
        let out = default_augmentation()(gray(128));
        assert_eq!(out.dimensions(), (3, 2));
    }
}
