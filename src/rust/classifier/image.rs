use ndarray::{s, Array3, ArrayView3, Axis};

use super::error::ClassifierError;

/// Number of channels in an RGB image
pub const RGB_CHANNELS: usize = 3;

/// Checks that an image is non-empty and laid out as H×W×`channels`.
pub fn validate_layout(image: ArrayView3<'_, u8>, channels: usize) -> Result<(), ClassifierError> {
    let (height, width, depth) = image.dim();
    if height == 0 || width == 0 {
        return Err(ClassifierError::InvalidImage(format!(
            "Image has no pixels ({}x{})",
            width, height
        )));
    }
    if depth != channels {
        return Err(ClassifierError::InvalidImage(format!(
            "Expected {} channels, found {}",
            channels, depth
        )));
    }
    Ok(())
}

/// Converts a grayscale (1), gray+alpha (2), RGB (3) or RGBA (4) image to RGB.
///
/// Gray is replicated across the three channels; alpha is dropped.
pub fn to_rgb(image: ArrayView3<'_, u8>) -> Result<Array3<u8>, ClassifierError> {
    let (height, width, depth) = image.dim();
    match depth {
        1 | 2 => {
            let gray = image.index_axis(Axis(2), 0);
            let mut rgb = Array3::zeros((height, width, RGB_CHANNELS));
            for mut channel in rgb.axis_iter_mut(Axis(2)) {
                channel.assign(&gray);
            }
            Ok(rgb)
        }
        3 | 4 => Ok(image.slice(s![.., .., ..RGB_CHANNELS]).to_owned()),
        other => Err(ClassifierError::InvalidImage(format!(
            "Cannot convert a {}-channel image to RGB",
            other
        ))),
    }
}
