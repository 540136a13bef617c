//! 桌台二维码渲染
//!
//! 每张桌台的二维码指向 `PUBLIC_BASE_URL/order/<table_id>`。
//! 单张导出 PNG；按区域批量导出时打包为 ZIP（每桌一个条目）。

use std::io::{Cursor, Write};

use image::Luma;
use qrcode::QrCode;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::utils::AppError;

/// QR 图最小边长 (像素)；打印 80mm 标签时仍然清晰
const MIN_DIMENSION: u32 = 512;

/// Render one order-page URL as a PNG QR code
pub fn render_qr_png(url: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::internal(format!("QR encoding failed: {e}")))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Build a ZIP archive of QR PNGs: one `(label, url)` pair per table
pub fn render_qr_archive(entries: &[(String, String)]) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for (label, url) in entries {
            let png = render_qr_png(url)?;
            let file_name = format!("QR_{}.png", sanitize_file_stem(label));
            zip.start_file(&file_name, options)
                .map_err(|e| AppError::internal(e.to_string()))?;
            zip.write_all(&png)
                .map_err(|e| AppError::internal(e.to_string()))?;
        }

        zip.finish()
            .map_err(|e| AppError::internal(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Table names come from user input; keep only filesystem-safe chars
fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if cleaned.chars().all(|c| c == '_') {
        "table".to_string()
    } else {
        cleaned
    }
}
