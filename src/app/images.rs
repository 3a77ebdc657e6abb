use std::error::Error;
use std::fmt;
use std::time::Duration;

use image::DynamicImage;

/// TMDB image size tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    Original,
    W500,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Original => "original",
            ImageSize::W500 => "w500",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the full image URL for a TMDB image path.
///
/// An empty path resolves to the bare image base, which serves as the placeholder.
pub fn resolve(image_base: &str, path: &str, size: ImageSize) -> String {
    let base = image_base.trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}/{}", base, size, path)
}

/// Downloads and decodes an image for rendering
pub fn download_image(url: &str, timeout: Duration) -> Result<DynamicImage, Box<dyn Error + Send + Sync>> {
    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send()?;

    if !response.status().is_success() {
        return Err(format!("Failed to download image: status {}", response.status()).into());
    }

    let bytes = response.bytes()?;
    let dyn_img = image::load_from_memory(&bytes)?;

    Ok(dyn_img)
}
