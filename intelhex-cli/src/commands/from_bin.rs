use anyhow::{bail, Context, Result};
use bytes::Bytes;
use intelhex_core::SegmentList;
use tracing::info;

use super::{read_input, write_output};

/// Convert a flat binary image loaded at `base` into HEX text
pub fn execute(
    input: Option<&str>,
    output: Option<&str>,
    base: u32,
    record_size: usize,
) -> Result<()> {
    info!(
        "Converting {} to HEX at base 0x{:08X}",
        input.unwrap_or("stdin"),
        base
    );

    let image = Bytes::from(read_input(input)?);
    let image_len = image.len();

    if base as u64 + image_len as u64 > 1u64 << 32 {
        bail!(
            "Image of {} bytes at 0x{:08X} exceeds the 32-bit address space",
            image_len,
            base
        );
    }

    let segments = SegmentList::from_image(base, image, record_size)
        .with_context(|| format!("Invalid record size {}", record_size))?;
    let text = segments
        .to_hex_string()
        .context("Failed to encode HEX records")?;

    write_output(output, text.as_bytes())?;

    info!(
        "Wrote {} bytes as {} data records",
        image_len,
        segments.len()
    );

    Ok(())
}
