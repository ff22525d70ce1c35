//! Planview原生文件格式（.plv）
//!
//! 基于 MessagePack + Zstd 的紧凑二进制格式：
//! 16字节文件头（魔数/版本/标志/压缩长度）+ 压缩数据。

use crate::document::Document;
use crate::error::FileError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// 文件魔数 "PLVW"
const MAGIC: &[u8; 4] = b"PLVW";

/// 当前文件格式版本
const FORMAT_VERSION: u32 = 1;

/// Zstd 压缩级别
const COMPRESSION_LEVEL: i32 = 3;

/// 文件头（16 字节）
#[derive(Debug)]
struct FileHeader {
    magic: [u8; 4],
    version: u32,
    flags: u32,
    compressed_size: u32,
}

impl FileHeader {
    fn new(compressed_size: u32) -> Self {
        Self {
            magic: *MAGIC,
            version: FORMAT_VERSION,
            flags: 0,
            compressed_size,
        }
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        Ok(())
    }

    fn read(reader: &mut impl Read) -> Result<Self, FileError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if &magic != MAGIC {
            return Err(FileError::InvalidFormat(
                "Invalid magic number, not a Planview file".to_string(),
            ));
        }

        let mut buf = [0u8; 4];

        reader.read_exact(&mut buf)?;
        let version = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let flags = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let compressed_size = u32::from_le_bytes(buf);

        Ok(Self {
            magic,
            version,
            flags,
            compressed_size,
        })
    }
}

/// 保存文档到文件
///
/// 字段名编码：样式中被跳过的可选字段不会让后续字段错位。
pub fn save(document: &Document, path: &Path) -> Result<(), FileError> {
    let msgpack_data = rmp_serde::to_vec_named(document)?;
    let compressed_data = zstd::encode_all(msgpack_data.as_slice(), COMPRESSION_LEVEL)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header = FileHeader::new(compressed_data.len() as u32);
    header.write(&mut writer)?;
    writer.write_all(&compressed_data)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} layers, {} annotations to {} ({} bytes compressed)",
        document.drawing.layers().len(),
        document.drawing.annotations().len(),
        path.display(),
        compressed_data.len()
    );

    Ok(())
}

/// 从文件加载文档
pub fn load(path: &Path) -> Result<Document, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = FileHeader::read(&mut reader)?;

    if header.version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(format!(
            "File version {} is newer than supported version {}",
            header.version, FORMAT_VERSION
        )));
    }

    let mut compressed_data = vec![0u8; header.compressed_size as usize];
    reader.read_exact(&mut compressed_data)?;

    let msgpack_data = zstd::decode_all(compressed_data.as_slice())?;
    let document: Document = rmp_serde::from_slice(&msgpack_data)?;

    tracing::info!(
        "Loaded {} layers, {} annotations from {}",
        document.drawing.layers().len(),
        document.drawing.annotations().len(),
        path.display()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planview_core::annotation::Annotation;
    use planview_core::drawing::Drawing;
    use planview_core::geometry::{Element, Geometry, Line};
    use planview_core::layer::Layer;
    use planview_core::math::Point2;
    use planview_core::style::{Color, LineType, Style};

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_document.plv");

        let mut drawing = Drawing::sample();
        drawing.add_annotation(Annotation::measurement(
            Point2::new(0.0, 0.0),
            Point2::new(300.0, 400.0),
        ));
        let doc = Document::new(drawing).with_title("Test Document");

        save(&doc, &file_path).expect("Failed to save");

        // 验证文件头
        let file = File::open(&file_path).expect("Failed to open");
        let mut reader = BufReader::new(file);
        let header = FileHeader::read(&mut reader).expect("Failed to read header");
        assert_eq!(&header.magic, MAGIC);
        assert_eq!(header.version, FORMAT_VERSION);
        assert_eq!(header.flags, 0);

        let loaded = load(&file_path).expect("Failed to load");
        assert_eq!(loaded.metadata.title, "Test Document");
        assert_eq!(loaded.drawing, doc.drawing);

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_partially_styled_elements_roundtrip() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_styled.plv");

        // 只设置部分样式字段，序列化时其余字段被跳过
        let element = Element::new(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        )))
        .with_style(Style::default().with_line_type(LineType::DashDot));
        let layer = Layer::new("l1", "L1", Color::rgb(0x1f, 0x29, 0x37))
            .with_elements(vec![element]);
        let doc = Document::new(Drawing::new(vec![layer]));

        save(&doc, &file_path).expect("Failed to save");
        let loaded = load(&file_path).expect("Failed to load");
        assert_eq!(loaded.drawing, doc.drawing);

        let restored = &loaded.drawing.layers()[0].elements[0];
        assert_eq!(restored.style.line_type, Some(LineType::DashDot));
        assert!(restored.style.stroke.is_none());

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_invalid_magic() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_invalid.plv");

        let mut file = File::create(&file_path).expect("Failed to create");
        file.write_all(b"XXXX").expect("Failed to write");
        file.write_all(&[0u8; 12]).expect("Failed to write padding");

        let result = load(&file_path);
        assert!(matches!(result, Err(FileError::InvalidFormat(_))));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_newer_version_rejected() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_version.plv");

        let mut file = File::create(&file_path).expect("Failed to create");
        file.write_all(MAGIC).expect("Failed to write");
        file.write_all(&99u32.to_le_bytes()).expect("Failed to write");
        file.write_all(&[0u8; 8]).expect("Failed to write");

        let result = load(&file_path);
        assert!(matches!(result, Err(FileError::UnsupportedVersion(_))));

        std::fs::remove_file(&file_path).ok();
    }
}
