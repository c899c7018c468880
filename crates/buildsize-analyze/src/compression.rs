//! Compressed size measurement.
//!
//! Files are compressed in memory into a byte counter, so compressed output
//! is never buffered or written anywhere.

use std::io::{self, Write};
use std::path::Path;

use brotli::enc::BrotliEncoderParams;
use flate2::Compression;
use flate2::write::GzEncoder;

use buildsize_core::{BuildSizeError, CompressionAlgorithm, Operation};

/// Buffer size handed to the brotli encoder.
const BROTLI_BUFFER_SIZE: usize = 4096;

/// Measures how large a file becomes under a compression codec.
pub trait CompressionSizer: Send + Sync {
    /// Compressed length of the file at `path`, in bytes. Blocking.
    fn compressed_size(
        &self,
        path: &Path,
        algorithm: CompressionAlgorithm,
    ) -> Result<u64, BuildSizeError>;
}

/// Compresses with flate2 (gzip) and brotli at their default settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecSizer;

impl CodecSizer {
    /// Create a new sizer.
    pub fn new() -> Self {
        Self
    }

    /// Compressed length of an in-memory buffer.
    pub fn compressed_len(data: &[u8], algorithm: CompressionAlgorithm) -> io::Result<u64> {
        match algorithm {
            CompressionAlgorithm::Gzip => {
                let mut encoder = GzEncoder::new(ByteCounter::default(), Compression::default());
                encoder.write_all(data)?;
                Ok(encoder.finish()?.count())
            }
            CompressionAlgorithm::Brotli => {
                let params = BrotliEncoderParams::default();
                let mut encoder = brotli::CompressorWriter::with_params(
                    ByteCounter::default(),
                    BROTLI_BUFFER_SIZE,
                    &params,
                );
                encoder.write_all(data)?;
                Ok(encoder.into_inner().count())
            }
        }
    }
}

impl CompressionSizer for CodecSizer {
    fn compressed_size(
        &self,
        path: &Path,
        algorithm: CompressionAlgorithm,
    ) -> Result<u64, BuildSizeError> {
        let operation = Operation::Compress(algorithm);
        let data = std::fs::read(path).map_err(|e| BuildSizeError::io(path, operation, e))?;
        Self::compressed_len(&data, algorithm).map_err(|e| BuildSizeError::io(path, operation, e))
    }
}

/// Writer that discards bytes and counts them.
#[derive(Debug, Default)]
struct ByteCounter(u64);

impl ByteCounter {
    fn count(&self) -> u64 {
        self.0
    }
}

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn sample_script() -> Vec<u8> {
        "function add(a, b) { return a + b; }\nconsole.log(add(1, 2));\n"
            .repeat(500)
            .into_bytes()
    }

    #[test]
    fn test_gzip_matches_encoded_output() {
        let data = sample_script();
        let measured = CodecSizer::compressed_len(&data, CompressionAlgorithm::Gzip).unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&data).unwrap();
        let encoded = encoder.finish().unwrap();

        assert_eq!(measured, encoded.len() as u64);
    }

    #[test]
    fn test_brotli_output_decodes() {
        let data = sample_script();
        let measured = CodecSizer::compressed_len(&data, CompressionAlgorithm::Brotli).unwrap();

        let mut encoded = Vec::new();
        {
            let mut encoder = brotli::CompressorWriter::with_params(
                &mut encoded,
                BROTLI_BUFFER_SIZE,
                &BrotliEncoderParams::default(),
            );
            encoder.write_all(&data).unwrap();
        }
        assert_eq!(measured, encoded.len() as u64);

        let mut decoded = Vec::new();
        brotli::Decompressor::new(encoded.as_slice(), BROTLI_BUFFER_SIZE)
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_compressible_text_shrinks() {
        let data = sample_script();
        for algorithm in [CompressionAlgorithm::Gzip, CompressionAlgorithm::Brotli] {
            let size = CodecSizer::compressed_len(&data, algorithm).unwrap();
            assert!(size > 0);
            assert!(size < data.len() as u64, "{algorithm} did not shrink input");
        }
    }

    #[test]
    fn test_empty_input_has_framing() {
        assert!(CodecSizer::compressed_len(&[], CompressionAlgorithm::Gzip).unwrap() > 0);
        assert!(CodecSizer::compressed_len(&[], CompressionAlgorithm::Brotli).unwrap() > 0);
    }

    #[test]
    fn test_compressed_size_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.js");
        std::fs::write(&path, sample_script()).unwrap();

        let size = CodecSizer::new()
            .compressed_size(&path, CompressionAlgorithm::Gzip)
            .unwrap();
        assert_eq!(
            size,
            CodecSizer::compressed_len(&sample_script(), CompressionAlgorithm::Gzip).unwrap()
        );
    }

    #[test]
    fn test_compressed_size_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.js");

        let err = CodecSizer::new()
            .compressed_size(&path, CompressionAlgorithm::Brotli)
            .unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(
            err,
            BuildSizeError::Io {
                operation: Operation::Compress(CompressionAlgorithm::Brotli),
                ..
            }
        ));
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.to_string().contains("brotli"));
    }
}
