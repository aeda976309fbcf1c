use crate::error::{Result, StrongboxError};
use crate::header::Compression;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::{Read, Write};

/// Encode text into a compressed, base64 transport token (zstd)
pub fn encode(data: &str) -> Result<String> {
    encode_with(data, Compression::default())
}

/// Decode a token produced by [`encode`]
pub fn decode(token: &str) -> Result<String> {
    decode_with(token, Compression::default())
}

/// Encode text using a specific compression algorithm
pub fn encode_with(data: &str, algorithm: Compression) -> Result<String> {
    let compressed = compress(data.as_bytes(), algorithm)?;
    Ok(STANDARD.encode(compressed))
}

/// Decode a token using a specific compression algorithm
pub fn decode_with(token: &str, algorithm: Compression) -> Result<String> {
    let compressed = STANDARD
        .decode(token.trim())
        .map_err(|e| StrongboxError::Codec(format!("invalid base64: {}", e)))?;
    let bytes = decompress(&compressed, algorithm)?;
    String::from_utf8(bytes)
        .map_err(|e| StrongboxError::Codec(format!("decoded data is not UTF-8: {}", e)))
}

/// Compress bytes for the container payload
pub fn compress(data: &[u8], algorithm: Compression) -> Result<Vec<u8>> {
    match algorithm {
        Compression::Zstd => {
            zstd::encode_all(data, ZSTD_LEVEL).map_err(|e| codec_error("zstd", e))
        }
        Compression::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
        Compression::Brotli => {
            let mut out = Vec::with_capacity(data.len() / 2);
            let mut writer =
                brotli::CompressorWriter::new(&mut out, BROTLI_BUFFER, BROTLI_QUALITY, 22);
            writer.write_all(data).map_err(|e| codec_error("brotli", e))?;
            drop(writer);
            Ok(out)
        }
        Compression::None => Ok(data.to_vec()),
    }
}

/// Reverse [`compress`]; a damaged frame is a `Codec` error
pub fn decompress(data: &[u8], algorithm: Compression) -> Result<Vec<u8>> {
    match algorithm {
        Compression::Zstd => zstd::decode_all(data).map_err(|e| codec_error("zstd", e)),
        Compression::Lz4 => {
            lz4_flex::decompress_size_prepended(data).map_err(|e| codec_error("lz4", e))
        }
        Compression::Brotli => {
            let mut out = Vec::new();
            brotli::Decompressor::new(data, BROTLI_BUFFER)
                .read_to_end(&mut out)
                .map_err(|e| codec_error("brotli", e))?;
            Ok(out)
        }
        Compression::None => Ok(data.to_vec()),
    }
}

const ZSTD_LEVEL: i32 = 3;
const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 5;

fn codec_error(name: &str, e: impl std::fmt::Display) -> StrongboxError {
    StrongboxError::Codec(format!("{}: {}", name, e))
}
