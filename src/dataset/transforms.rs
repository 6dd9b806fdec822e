use image::imageops::FilterType;
use image::DynamicImage;
use std::sync::Arc;

/// Applied to every decoded image before it is handed out
pub type ImageTransform<T> = Arc<dyn Fn(DynamicImage) -> T + Send + Sync>;
/// Applied to every integer class before it is handed out
pub type LabelTransform<L> = Arc<dyn Fn(i64) -> L + Send + Sync>;

pub fn identity_image() -> ImageTransform<DynamicImage> {
    Arc::new(|img: DynamicImage| img)
}

pub fn identity_label() -> LabelTransform<i64> {
    Arc::new(|label: i64| label)
}

/// Chains two image transforms, `first` runs first
pub fn compose<A, B>(
    first: ImageTransform<A>,
    then: impl Fn(A) -> B + Send + Sync + 'static,
) -> ImageTransform<B>
where
    A: 'static,
    B: 'static,
{
    Arc::new(move |img: DynamicImage| then(first(img)))
}

/// Squashes the image into `size`x`size`, ignoring aspect ratio
pub fn resize_square(size: u32) -> ImageTransform<DynamicImage> {
    Arc::new(move |img: DynamicImage| img.resize_exact(size, size, FilterType::Triangle))
}

/// RGB pixels in channel-first layout, scaled to [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ChwImage {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    pub data: Vec<f32>,
}

impl ChwImage {
    pub fn shape(&self) -> [usize; 3] {
        [self.channels, self.height, self.width]
    }

    /// Panics if any coordinate is outside `shape()`
    pub fn at(&self, channel: usize, y: usize, x: usize) -> f32 {
        assert!(
            channel < self.channels && y < self.height && x < self.width,
            "({}, {}, {}) outside image of shape {:?}",
            channel,
            y,
            x,
            self.shape()
        );
        self.data[(channel * self.height + y) * self.width + x]
    }
}

/// What a tensor library expects as input: drop alpha, go from HWC to CHW
pub fn to_chw_f32(img: DynamicImage) -> ChwImage {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let raw = rgb.into_raw();
    let plane = width * height;
    let mut data = vec![0f32; 3 * plane];
    for (pixel_idx, pixel) in raw.chunks_exact(3).enumerate() {
        for (channel, value) in pixel.iter().enumerate() {
            data[channel * plane + pixel_idx] = *value as f32 / 255.;
        }
    }
    ChwImage {
        channels: 3,
        height,
        width,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn two_by_one() -> DynamicImage {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn chw_layout() {
        let chw = to_chw_f32(two_by_one());
        assert_eq!(chw.shape(), [3, 1, 2]);
        assert_eq!(chw.at(0, 0, 0), 1.0);
        assert_eq!(chw.at(2, 0, 0), 0.0);
        assert_eq!(chw.at(0, 0, 1), 0.0);
        assert_eq!(chw.at(2, 0, 1), 1.0);
    }

    #[test]
    #[should_panic(expected = "outside image")]
    fn at_rejects_column_past_width() {
        // (0, 0, 2) would still land inside the buffer, at channel 1
        to_chw_f32(two_by_one()).at(0, 0, 2);
    }

    #[test]
    fn compose_runs_in_order() {
        let pipeline = compose(resize_square(4), to_chw_f32);
        let out = pipeline(two_by_one());
        assert_eq!(out.shape(), [3, 4, 4]);
    }

    #[test]
    fn identities_do_nothing() {
        assert_eq!(identity_label()(9), 9);
        let img = identity_image()(two_by_one());
        assert_eq!(img.to_rgb8().get_pixel(1, 0), &Rgb([0, 0, 255]));
    }
}
