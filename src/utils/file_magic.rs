/// 文档附件支持的文件签名
const SIGNATURES: &[(&[&str], &[u8])] = &[
    (&[".pdf"], b"%PDF"),
    (&[".png"], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
    (&[".jpg", ".jpeg"], &[0xFF, 0xD8, 0xFF]),
];

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// 扩展名包含点号（如 ".pdf"），大小写不敏感；未登记的扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }
    let extension = extension.to_lowercase();
    SIGNATURES
        .iter()
        .find(|(exts, _)| exts.contains(&extension.as_str()))
        .is_some_and(|(_, magic)| data.starts_with(magic))
}

/// 根据扩展名返回下载时使用的 Content-Type
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".pdf" => "application/pdf",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpg"));
        assert!(validate_magic_bytes(&jpeg_header, ".jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, ".pdf"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"<html>", ".pdf"));
    }

    #[test]
    fn test_unknown_and_empty_rejected() {
        assert!(!validate_magic_bytes(b"MZ", ".exe"));
        assert!(!validate_magic_bytes(&[], ".pdf"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for(".PDF"), "application/pdf");
        assert_eq!(content_type_for(".bin"), "application/octet-stream");
    }
}
