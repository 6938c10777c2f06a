// loader.rs — background image decode, results correlated by request token

use crate::error::ImageLoadError;
use crate::model::ImageRef;
use base64::Engine as _;
use image::io::Reader as ImageReader;
use image::{GenericImageView, RgbaImage};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

/// A texture swap the viewer wants decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub token: u64,
    pub reference: ImageRef,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub token: u64,
    pub reference: ImageRef,
    pub result: Result<RgbaImage, ImageLoadError>,
}

pub struct ImageLoader {
    base_dir: PathBuf,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    in_flight: usize,
}

impl ImageLoader {
    /// Relative file references resolve against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let (tx, rx) = channel();
        Self {
            base_dir: base_dir.into(),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn request(&mut self, request: LoadRequest) {
        let tx = self.tx.clone();
        let base_dir = self.base_dir.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            log::info!(
                "{}",
                crate::i18n::tr_with("log.loading_image_bg", &[("path", request.reference.to_string())])
            );
            let result = decode(&request.reference, &base_dir);
            let outcome = LoadOutcome {
                token: request.token,
                reference: request.reference,
                result,
            };
            if tx.send(outcome).is_err() {
                log::warn!("{}", crate::i18n::tr("error.send_to_main_failed"));
            }
        });
    }

    /// Next finished load, if any. Never blocks.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Decode a file path or `data:` URL to RGBA.
pub fn decode(reference: &ImageRef, base_dir: &Path) -> Result<RgbaImage, ImageLoadError> {
    let img = if reference.is_data_url() {
        let bytes = data_url_bytes(reference.as_str()).ok_or_else(|| ImageLoadError::DataUrl {
            reference: reference.to_string(),
        })?;
        decode_reader(Cursor::new(bytes), reference)?
    } else {
        let path = resolve(reference.as_str(), base_dir);
        let file = File::open(&path).map_err(|source| ImageLoadError::Open {
            reference: reference.to_string(),
            source,
        })?;
        decode_reader(BufReader::new(file), reference)?
    };

    let (w, h) = img.dimensions();
    log::info!(
        "{}",
        crate::i18n::tr_with("log.image_loaded_size", &[("w", w.to_string()), ("h", h.to_string())])
    );
    Ok(img.to_rgba8())
}

fn decode_reader<R: BufRead + Seek>(
    reader: R,
    reference: &ImageRef,
) -> Result<image::DynamicImage, ImageLoadError> {
    ImageReader::new(reader)
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|mut r| {
            r.no_limits();
            r.decode()
        })
        .map_err(|source| ImageLoadError::Decode {
            reference: reference.to_string(),
            source,
        })
}

fn resolve(reference: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(reference);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Payload of `data:<mime>;base64,<payload>`.
fn data_url_bytes(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    if !header.ends_with(";base64") {
        return None;
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .ok()
}
