use anyhow::{bail, Context, Result};
use intelhex_core::{read_segments, SegmentList};
use tracing::info;

use super::{open_input, write_output};

/// Convert a HEX file into a flat binary image
pub fn execute(input: Option<&str>, output: Option<&str>, fill: u8) -> Result<()> {
    info!("Converting {} to binary", input.unwrap_or("stdin"));

    let reader = open_input(input)?;
    let mut segments = read_segments(reader).context("Error scanning source")?;

    if segments.is_empty() {
        bail!("No segments found");
    }

    segments.sort();
    let image = flatten(&segments, fill)?;

    info!(
        "Image: {} bytes from {} segments starting at 0x{:08X}",
        image.len(),
        segments.len(),
        segments.as_slice()[0].address
    );

    write_output(output, &image)
}

/// Lay sorted segments into one buffer starting at the first segment's address
///
/// Gaps are filled with `fill`. Overlapping segments are written in order, so
/// the later one wins.
pub fn flatten(segments: &SegmentList, fill: u8) -> Result<Vec<u8>> {
    let Some(first) = segments.as_slice().first() else {
        return Ok(Vec::new());
    };
    let start = first.address as u64;

    let span = segments
        .iter()
        .map(|s| s.end())
        .max()
        .unwrap_or(start)
        - start;
    let span = usize::try_from(span).context("Image too large for this platform")?;

    let mut image = vec![fill; span];
    for segment in segments {
        let offset = (segment.address as u64 - start) as usize;
        image[offset..offset + segment.len()].copy_from_slice(&segment.data);
    }

    Ok(image)
}
