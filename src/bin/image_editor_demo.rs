//! Smoke test: load one image and print the shapes produced by each step.
//!
//! Usage: `image_editor_demo [path]` (defaults to `00000.jpg`).

use image_editor::{add_new_channel, EditMethod, ImageEditor, Scale};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "00000.jpg".to_string());
    let edition = ImageEditor::open(&path)?;
    println!("loaded image {:?}", edition.get_no_edited_img().shape());

    let scale = Scale::new(256, 256)?;
    let reshaped = edition.edit_img_array(EditMethod::Gray, scale)?;
    println!("rescaled image {:?}", reshaped.shape());

    let resized = edition.reshape_image(scale)?;
    println!("resized image {:?}", resized.shape());

    let reshaped = add_new_channel(reshaped.into_dyn(), 1, false)?;
    println!("new channel added {:?}", reshaped.shape());

    Ok(())
}
