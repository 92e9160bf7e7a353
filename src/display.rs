//! Blocking debug display.
//!
//! [`Viewer`] is the seam between the editor and whatever shows pixels on
//! screen. [`SystemViewer`] writes a PNG preview to a temporary file, hands
//! it to the platform's default image viewer and then blocks until the user
//! presses Enter or the timeout runs out.

use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use log::{debug, info, warn};
use ndarray::{ArrayViewD, Axis};

use crate::error::{EditorError, Result};

/// Something that can present an image and block until it is dismissed.
pub trait Viewer {
    /// Show `image` in a window titled `label`, returning once the user
    /// dismisses it or `timeout` elapses.
    fn show(&self, label: &str, image: ArrayViewD<u8>, timeout: Duration) -> Result<()>;
}

/// Opens previews with the operating system's default image viewer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn show(&self, label: &str, image: ArrayViewD<u8>, timeout: Duration) -> Result<()> {
        let mut preview = tempfile::Builder::new()
            .prefix(&preview_prefix(label))
            .suffix(".png")
            .tempfile()?;
        to_dynamic_image(image)?
            .write_to(preview.as_file_mut(), ImageFormat::Png)
            .map_err(EditorError::Encode)?;
        debug!("showing {} from {}", label, preview.path().display());

        if let Err(e) = open_with_system(preview.path()) {
            warn!("Failed to open viewer for {}: {}", preview.path().display(), e);
        }

        info!("{label}: press Enter to continue");
        let dismissed = stdin_lines().wait(timeout);
        debug!("{} closed ({})", label, if dismissed { "key" } else { "timeout" });

        // Closing deletes the preview file.
        if let Err(e) = preview.close() {
            debug!("could not remove preview for {}: {}", label, e);
        }
        Ok(())
    }
}

fn preview_prefix(label: &str) -> String {
    let name: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("image_editor_{name}_")
}

fn system_opener() -> Option<&'static str> {
    if cfg!(target_os = "windows") {
        Some("explorer")
    } else if cfg!(target_os = "macos") {
        Some("open")
    } else if cfg!(unix) {
        Some("xdg-open")
    } else {
        None
    }
}

fn open_with_system(path: &Path) -> std::io::Result<()> {
    let Some(opener) = system_opener() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no system image viewer on this platform",
        ));
    };
    std::process::Command::new(opener).arg(path).spawn().map(|_| ())
}

/// Completed input lines from a single background reader.
///
/// One reader thread lives as long as its source, so a line typed after a
/// wait has timed out is never consumed by an abandoned reader.
pub(crate) struct LineWaiter {
    lines: Mutex<Receiver<()>>,
}

impl LineWaiter {
    pub(crate) fn spawn<R: BufRead + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut line = String::new();
            loop {
                line.clear();
                match reader.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {
                        if tx.send(()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Self {
            lines: Mutex::new(rx),
        }
    }

    /// Returns true if a line arrived before the timeout.
    ///
    /// Lines entered before the call are discarded. Once the source is
    /// closed the call sleeps out the remaining timeout.
    pub(crate) fn wait(&self, timeout: Duration) -> bool {
        let lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        while lines.try_recv().is_ok() {}

        let start = Instant::now();
        match lines.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(timeout.saturating_sub(start.elapsed()));
                false
            }
        }
    }
}

fn stdin_lines() -> &'static LineWaiter {
    static STDIN_LINES: OnceLock<LineWaiter> = OnceLock::new();
    STDIN_LINES.get_or_init(|| LineWaiter::spawn(std::io::BufReader::new(std::io::stdin())))
}


/// Convert a 2D plane or (height, width, 1|3|4) buffer into an encodable image.
pub fn to_dynamic_image(image: ArrayViewD<u8>) -> Result<DynamicImage> {
    let shape = image.shape().to_vec();
    let (height, width, channels) = match *shape.as_slice() {
        [h, w] => (h, w, 1),
        [h, w, c] => (h, w, c),
        _ => {
            return Err(EditorError::UnsupportedRank {
                expected: "2 or 3",
                actual: shape.len(),
            })
        }
    };
    if height == 0 || width == 0 {
        return Err(EditorError::EmptyImage);
    }

    let raw: Vec<u8> = image.as_standard_layout().iter().copied().collect();
    let (w, h) = (width as u32, height as u32);
    let mismatch = || EditorError::ShapeMismatch {
        from: shape.clone(),
        to: vec![height, width, channels],
    };

    match channels {
        1 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8).ok_or_else(mismatch),
        3 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8).ok_or_else(mismatch),
        4 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8).ok_or_else(mismatch),
        other => Err(EditorError::ChannelOutOfRange {
            channel: other - 1,
            channels: other,
        }),
    }
}

/// Drop trailing length-1 axes beyond rank 3 so channel-expanded buffers can be shown.
pub(crate) fn squeeze_trailing(mut image: ArrayViewD<u8>) -> ArrayViewD<u8> {
    while image.ndim() > 3 && image.len_of(Axis(image.ndim() - 1)) == 1 {
        let last = image.ndim() - 1;
        image = image.index_axis_move(Axis(last), 0);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, Array4};

    #[test]
    fn test_gray_plane_converts() {
        let img = Array2::<u8>::from_elem((3, 5), 9);
        let dynamic = to_dynamic_image(img.view().into_dyn()).unwrap();
        assert_eq!((dynamic.width(), dynamic.height()), (5, 3));
        assert!(matches!(dynamic, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_rgb_converts_in_row_major_order() {
        let mut img = Array3::<u8>::zeros((2, 2, 3));
        img[[1, 0, 2]] = 200;
        let dynamic = to_dynamic_image(img.view().into_dyn()).unwrap();
        let rgb = dynamic.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 1)[2], 200);
    }

    #[test]
    fn test_two_channels_rejected() {
        let img = Array3::<u8>::zeros((2, 2, 2));
        assert!(to_dynamic_image(img.view().into_dyn()).is_err());
    }

    #[test]
    fn test_squeeze_trailing_axes() {
        let img = Array4::<u8>::zeros((4, 4, 3, 1));
        let squeezed = squeeze_trailing(img.view().into_dyn());
        assert_eq!(squeezed.shape(), &[4, 4, 3]);
    }

    #[test]
    fn test_preview_prefix_is_sanitized() {
        assert_eq!(preview_prefix("Current Image 3"), "image_editor_Current_Image_3_");
    }

    /// Byte source fed from a channel, standing in for a terminal.
    struct ChannelReader {
        chunks: mpsc::Receiver<Vec<u8>>,
        pending: Vec<u8>,
    }

    impl std::io::Read for ChannelReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pending.is_empty() {
                match self.chunks.recv() {
                    Ok(chunk) => self.pending = chunk,
                    Err(_) => return Ok(0),
                }
            }
            let n = buf.len().min(self.pending.len());
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
            Ok(n)
        }
    }

    fn channel_waiter() -> (mpsc::Sender<Vec<u8>>, LineWaiter) {
        let (tx, rx) = mpsc::channel();
        let reader = std::io::BufReader::new(ChannelReader {
            chunks: rx,
            pending: Vec::new(),
        });
        (tx, LineWaiter::spawn(reader))
    }

    #[test]
    fn test_enter_after_timeout_reaches_next_wait() {
        let (tx, waiter) = channel_waiter();
        assert!(!waiter.wait(Duration::from_millis(30)));

        let typist = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            tx.send(b"\n".to_vec()).unwrap();
            tx
        });
        assert!(waiter.wait(Duration::from_secs(10)));
        drop(typist.join().unwrap());
    }

    #[test]
    fn test_stale_lines_are_discarded() {
        let (tx, waiter) = channel_waiter();
        tx.send(b"early\n".to_vec()).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        assert!(!waiter.wait(Duration::from_millis(30)));

        tx.send(b"\n".to_vec()).unwrap();
        assert!(waiter.wait(Duration::from_secs(10)));
    }

    #[test]
    fn test_closed_source_still_waits_out_timeout() {
        let (tx, waiter) = channel_waiter();
        drop(tx);
        let start = Instant::now();
        assert!(!waiter.wait(Duration::from_millis(40)));
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
