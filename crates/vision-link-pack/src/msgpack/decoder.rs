//! `MsgPackDecoder`: MessagePack to [`PackValue`] decoder.
//!
//! The decoder itself only holds [`DecoderOptions`]; every call to
//! [`MsgPackDecoder::decode`] walks the input with a fresh borrowed cursor.

use super::error::MsgPackError;
use crate::{PackExtension, PackValue};

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Accept `bin*` map keys and read them as UTF-8 text.
    ///
    /// Older producers write map keys as binary. With this off such keys are
    /// rejected with [`MsgPackError::InvalidKeyType`].
    pub coerce_binary_keys: bool,
    /// Maximum array/map nesting before [`MsgPackError::TooDeep`].
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            coerce_binary_keys: false,
            max_depth: 256,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MsgPackDecoder {
    options: DecoderOptions,
}

impl MsgPackDecoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Decode the first value in `input`. Trailing bytes are ignored.
    pub fn decode(&self, input: &[u8]) -> Result<PackValue, MsgPackError> {
        let mut cursor = Cursor {
            data: input,
            x: 0,
            options: self.options,
        };
        cursor.read_any(0)
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    x: usize,
    options: DecoderOptions,
}

impl<'a> Cursor<'a> {
    #[inline]
    fn take(&mut self, n: usize) -> Result<&'a [u8], MsgPackError> {
        let end = self.x.checked_add(n).ok_or(MsgPackError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(MsgPackError::UnexpectedEof);
        }
        let slice = &self.data[self.x..end];
        self.x = end;
        Ok(slice)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], MsgPackError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    #[inline]
    fn u8(&mut self) -> Result<u8, MsgPackError> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    fn u16(&mut self) -> Result<u16, MsgPackError> {
        self.array().map(u16::from_be_bytes)
    }

    #[inline]
    fn u32(&mut self) -> Result<u32, MsgPackError> {
        self.array().map(u32::from_be_bytes)
    }

    fn utf8(&mut self, size: usize) -> Result<String, MsgPackError> {
        let start = self.x;
        let bytes = self.take(size)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| MsgPackError::InvalidUtf8(start))
    }

    fn buf(&mut self, size: usize) -> Result<Vec<u8>, MsgPackError> {
        self.take(size).map(<[u8]>::to_vec)
    }

    fn read_any(&mut self, depth: usize) -> Result<PackValue, MsgPackError> {
        let byte = self.u8()?;

        // positive fixint: 0x00–0x7f
        if byte <= 0x7f {
            return Ok(PackValue::Integer(byte as i64));
        }
        // negative fixint: 0xe0–0xff
        if byte >= 0xe0 {
            return Ok(PackValue::Integer(byte as i8 as i64));
        }
        // fixmap: 0x80–0x8f
        if byte <= 0x8f {
            return self.read_obj(byte as usize & 0xf, depth);
        }
        // fixarray: 0x90–0x9f
        if byte <= 0x9f {
            return self.read_arr(byte as usize & 0xf, depth);
        }
        // fixstr: 0xa0–0xbf
        if byte <= 0xbf {
            return self.utf8(byte as usize & 0x1f).map(PackValue::Str);
        }

        match byte {
            0xc0 => Ok(PackValue::Null),
            0xc1 => Ok(PackValue::Undefined),
            0xc2 => Ok(PackValue::Bool(false)),
            0xc3 => Ok(PackValue::Bool(true)),
            // bin8, bin16, bin32
            0xc4 => {
                let n = self.u8()? as usize;
                self.buf(n).map(PackValue::Bytes)
            }
            0xc5 => {
                let n = self.u16()? as usize;
                self.buf(n).map(PackValue::Bytes)
            }
            0xc6 => {
                let n = self.u32()? as usize;
                self.buf(n).map(PackValue::Bytes)
            }
            // ext8, ext16, ext32
            0xc7 => {
                let n = self.u8()? as usize;
                self.read_ext(n)
            }
            0xc8 => {
                let n = self.u16()? as usize;
                self.read_ext(n)
            }
            0xc9 => {
                let n = self.u32()? as usize;
                self.read_ext(n)
            }
            // float32, float64
            0xca => Ok(PackValue::Float(f32::from_be_bytes(self.array()?) as f64)),
            0xcb => Ok(PackValue::Float(f64::from_be_bytes(self.array()?))),
            // uint8, uint16, uint32, uint64
            0xcc => Ok(PackValue::Integer(self.u8()? as i64)),
            0xcd => Ok(PackValue::Integer(self.u16()? as i64)),
            0xce => Ok(PackValue::Integer(self.u32()? as i64)),
            0xcf => {
                let v = u64::from_be_bytes(self.array()?);
                Ok(match i64::try_from(v) {
                    Ok(i) => PackValue::Integer(i),
                    Err(_) => PackValue::UInteger(v),
                })
            }
            // int8, int16, int32, int64
            0xd0 => Ok(PackValue::Integer(i8::from_be_bytes(self.array()?) as i64)),
            0xd1 => Ok(PackValue::Integer(i16::from_be_bytes(self.array()?) as i64)),
            0xd2 => Ok(PackValue::Integer(i32::from_be_bytes(self.array()?) as i64)),
            0xd3 => Ok(PackValue::Integer(i64::from_be_bytes(self.array()?))),
            // fixext1, fixext2, fixext4, fixext8, fixext16
            0xd4 => self.read_ext(1),
            0xd5 => self.read_ext(2),
            0xd6 => self.read_ext(4),
            0xd7 => self.read_ext(8),
            0xd8 => self.read_ext(16),
            // str8, str16, str32
            0xd9 => {
                let n = self.u8()? as usize;
                self.utf8(n).map(PackValue::Str)
            }
            0xda => {
                let n = self.u16()? as usize;
                self.utf8(n).map(PackValue::Str)
            }
            0xdb => {
                let n = self.u32()? as usize;
                self.utf8(n).map(PackValue::Str)
            }
            // array16, array32
            0xdc => {
                let n = self.u16()? as usize;
                self.read_arr(n, depth)
            }
            0xdd => {
                let n = self.u32()? as usize;
                self.read_arr(n, depth)
            }
            // map16, map32
            0xde => {
                let n = self.u16()? as usize;
                self.read_obj(n, depth)
            }
            0xdf => {
                let n = self.u32()? as usize;
                self.read_obj(n, depth)
            }
            _ => Err(MsgPackError::InvalidByte(self.x - 1)),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, MsgPackError> {
        if depth >= self.options.max_depth {
            return Err(MsgPackError::TooDeep(self.options.max_depth));
        }
        Ok(depth + 1)
    }

    fn read_obj(&mut self, size: usize, depth: usize) -> Result<PackValue, MsgPackError> {
        let depth = self.enter(depth)?;
        // Each entry needs at least two bytes; don't trust the header beyond that.
        let mut obj = Vec::with_capacity(size.min(self.data.len().saturating_sub(self.x) / 2));
        for _ in 0..size {
            let key = self.read_key(depth)?;
            let val = self.read_any(depth)?;
            obj.push((key, val));
        }
        Ok(PackValue::Object(obj))
    }

    fn read_arr(&mut self, size: usize, depth: usize) -> Result<PackValue, MsgPackError> {
        let depth = self.enter(depth)?;
        let mut arr = Vec::with_capacity(size.min(self.data.len().saturating_sub(self.x)));
        for _ in 0..size {
            arr.push(self.read_any(depth)?);
        }
        Ok(PackValue::Array(arr))
    }

    fn read_ext(&mut self, size: usize) -> Result<PackValue, MsgPackError> {
        let tag = self.u8()? as i8;
        let data = self.buf(size)?;
        Ok(PackValue::Extension(Box::new(PackExtension::new(tag, data))))
    }

    /// Read a map key as text.
    fn read_key(&mut self, depth: usize) -> Result<String, MsgPackError> {
        let start = self.x;
        match self.read_any(depth)? {
            PackValue::Str(s) => Ok(s),
            PackValue::Bytes(b) if self.options.coerce_binary_keys => {
                String::from_utf8(b).map_err(|_| MsgPackError::InvalidUtf8(start))
            }
            PackValue::Integer(i) => Ok(i.to_string()),
            PackValue::UInteger(u) => Ok(u.to_string()),
            _ => Err(MsgPackError::InvalidKeyType(start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_key_needs_coercion() {
        // {bin8 "ok": true}
        let input = [0x81, 0xc4, 0x02, b'o', b'k', 0xc3];
        let strict = MsgPackDecoder::default();
        assert_eq!(strict.decode(&input), Err(MsgPackError::InvalidKeyType(1)));

        let lenient = MsgPackDecoder::new(DecoderOptions {
            coerce_binary_keys: true,
            ..DecoderOptions::default()
        });
        assert_eq!(
            lenient.decode(&input).unwrap(),
            PackValue::Object(vec![("ok".into(), PackValue::Bool(true))])
        );
    }

    #[test]
    fn integer_keys_become_decimal_text() {
        let input = [0x82, 0x01, 0xa1, b'a', 0xff, 0xa1, b'b'];
        assert_eq!(
            MsgPackDecoder::default().decode(&input).unwrap(),
            PackValue::Object(vec![
                ("1".into(), PackValue::Str("a".into())),
                ("-1".into(), PackValue::Str("b".into())),
            ])
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let decoder = MsgPackDecoder::new(DecoderOptions {
            max_depth: 2,
            ..DecoderOptions::default()
        });
        assert!(decoder.decode(&[0x91, 0x91, 0x90]).is_err());
        assert!(decoder.decode(&[0x91, 0x90]).is_ok());
    }

    #[test]
    fn lying_length_header_is_eof_not_panic() {
        assert_eq!(
            MsgPackDecoder::default().decode(&[0xdd, 0xff, 0xff, 0xff, 0xff]),
            Err(MsgPackError::UnexpectedEof)
        );
        assert_eq!(
            MsgPackDecoder::default().decode(&[0xc6, 0xff, 0xff, 0xff, 0xff, 0x00]),
            Err(MsgPackError::UnexpectedEof)
        );
    }
}
