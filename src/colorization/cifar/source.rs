use crate::colorization::common::error::Result;
use crate::colorization::cifar::types::CifarImage;

pub trait ImageSource {
    fn load_images(&self) -> Result<Vec<CifarImage>>;
}
