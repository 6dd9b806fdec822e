pub mod landmarks_dataset;

pub use landmarks_dataset::{Landmarks, LandmarksBuilder};
