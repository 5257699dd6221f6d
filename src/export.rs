//! Crop export: one PNG per region, packaged into a ZIP archive.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    /// Regions whose geometry, clamped to the image, had no area left.
    pub skipped: usize,
}

/// Writes `{base_name}_crop_{id}.png` entries for every region into a ZIP
/// archive at `dest`, in ascending id order. Each region is clamped to the
/// image rectangle first; regions with no remaining area are skipped
/// rather than treated as errors.
pub fn export_regions_zip(
    image: &DynamicImage,
    regions: &[Region],
    dest: &Path,
    base_name: &str,
) -> Result<ExportSummary> {
    let file = File::create(dest)
        .with_context(|| format!("failed to create archive {}", dest.display()))?;
    let mut archive = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let img_w = image.width() as f32;
    let img_h = image.height() as f32;
    let mut summary = ExportSummary {
        exported: 0,
        skipped: 0,
    };

    for region in regions {
        let rect = region.rect;
        let left = rect.x.round().clamp(0.0, img_w) as u32;
        let top = rect.y.round().clamp(0.0, img_h) as u32;
        let right = rect.right().round().clamp(0.0, img_w) as u32;
        let bottom = rect.bottom().round().clamp(0.0, img_h) as u32;
        if right <= left || bottom <= top {
            summary.skipped += 1;
            continue;
        }

        let cropped = image.crop_imm(left, top, right - left, bottom - top);
        let mut png = Vec::new();
        cropped
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .with_context(|| format!("failed to encode crop {}", region.id))?;

        archive
            .start_file(format!("{base_name}_crop_{}.png", region.id), options)
            .with_context(|| format!("failed to add crop {} to archive", region.id))?;
        archive.write_all(&png)?;
        summary.exported += 1;
    }

    archive.finish().context("failed to finish archive")?;
    log::info!(
        "exported {} crop(s) ({} skipped) to {}",
        summary.exported,
        summary.skipped,
        dest.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use image::RgbaImage;

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(100, 80, |x, y| {
            image::Rgba([x as u8, y as u8, 0, 255])
        }))
    }

    #[test]
    fn exports_one_entry_per_valid_region() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("crops.zip");
        let regions = vec![
            Region {
                id: 1,
                rect: Rect::new(10.0, 10.0, 30.0, 20.0),
            },
            Region {
                id: 3,
                rect: Rect::new(90.0, 70.0, 50.0, 50.0), // clipped, still has area
            },
        ];

        let summary = export_regions_zip(&test_image(), &regions, &dest, "photo").unwrap();
        assert_eq!(summary.exported, 2);
        assert_eq!(summary.skipped, 0);

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["photo_crop_1.png", "photo_crop_3.png"]);
    }

    #[test]
    fn degenerate_region_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("crops.zip");
        let regions = vec![Region {
            id: 1,
            rect: Rect::new(200.0, 200.0, 40.0, 40.0), // entirely outside
        }];

        let summary = export_regions_zip(&test_image(), &regions, &dest, "photo").unwrap();
        assert_eq!(summary.exported, 0);
        assert_eq!(summary.skipped, 1);
    }
}
