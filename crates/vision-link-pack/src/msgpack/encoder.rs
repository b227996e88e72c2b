//! `MsgPackEncoder`: [`PackValue`] to MessagePack encoder.
//!
//! Integers use the shortest form that holds them, floats are always
//! written as float64.

use crate::{PackExtension, PackValue};

#[derive(Debug, Default)]
pub struct MsgPackEncoder {
    out: Vec<u8>,
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `value`, returning the bytes and leaving the encoder empty.
    pub fn encode(&mut self, value: &PackValue) -> Vec<u8> {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    pub fn write_any(&mut self, value: &PackValue) {
        match value {
            PackValue::Null => self.out.push(0xc0),
            PackValue::Undefined => self.out.push(0xc1),
            PackValue::Bool(b) => self.out.push(if *b { 0xc3 } else { 0xc2 }),
            PackValue::Integer(i) => self.write_integer(*i),
            PackValue::UInteger(u) => self.write_u_integer(*u),
            PackValue::Float(f) => self.write_float(*f),
            PackValue::Bytes(b) => self.write_bin(b),
            PackValue::Str(s) => self.write_str(s),
            PackValue::Array(arr) => {
                self.write_arr_hdr(arr.len());
                for item in arr {
                    self.write_any(item);
                }
            }
            PackValue::Object(obj) => {
                self.write_obj_hdr(obj.len());
                for (key, val) in obj {
                    self.write_str(key);
                    self.write_any(val);
                }
            }
            PackValue::Extension(ext) => self.write_ext(ext),
        }
    }

    pub fn write_float(&mut self, float: f64) {
        self.out.push(0xcb);
        self.out.extend_from_slice(&float.to_be_bytes());
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -0x20 {
            self.out.push(int as i8 as u8);
        } else if int >= i8::MIN as i64 {
            self.out.push(0xd0);
            self.out.push(int as i8 as u8);
        } else if int >= i16::MIN as i64 {
            self.out.push(0xd1);
            self.out.extend_from_slice(&(int as i16).to_be_bytes());
        } else if int >= i32::MIN as i64 {
            self.out.push(0xd2);
            self.out.extend_from_slice(&(int as i32).to_be_bytes());
        } else {
            self.out.push(0xd3);
            self.out.extend_from_slice(&int.to_be_bytes());
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= 0x7f {
            self.out.push(uint as u8);
        } else if uint <= 0xff {
            self.out.extend_from_slice(&[0xcc, uint as u8]);
        } else if uint <= 0xffff {
            self.out.push(0xcd);
            self.out.extend_from_slice(&(uint as u16).to_be_bytes());
        } else if uint <= 0xffff_ffff {
            self.out.push(0xce);
            self.out.extend_from_slice(&(uint as u32).to_be_bytes());
        } else {
            self.out.push(0xcf);
            self.out.extend_from_slice(&uint.to_be_bytes());
        }
    }

    fn write_len(&mut self, length: usize, fix: Option<(u8, usize)>, markers: [u8; 3]) {
        match fix {
            Some((base, max)) if length <= max => self.out.push(base | length as u8),
            _ if length <= 0xff && markers[0] != 0 => {
                self.out.extend_from_slice(&[markers[0], length as u8]);
            }
            _ if length <= 0xffff => {
                self.out.push(markers[1]);
                self.out.extend_from_slice(&(length as u16).to_be_bytes());
            }
            _ => {
                self.out.push(markers[2]);
                self.out.extend_from_slice(&(length as u32).to_be_bytes());
            }
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_len(s.len(), Some((0xa0, 0x1f)), [0xd9, 0xda, 0xdb]);
        self.out.extend_from_slice(s.as_bytes());
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.write_len(buf.len(), None, [0xc4, 0xc5, 0xc6]);
        self.out.extend_from_slice(buf);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        // No 8-bit array form exists.
        self.write_len(length, Some((0x90, 0xf)), [0, 0xdc, 0xdd]);
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        self.write_len(length, Some((0x80, 0xf)), [0, 0xde, 0xdf]);
    }

    pub fn write_ext(&mut self, ext: &PackExtension) {
        let tag = ext.tag as u8;
        let fixed = match ext.data.len() {
            1 => Some(0xd4),
            2 => Some(0xd5),
            4 => Some(0xd6),
            8 => Some(0xd7),
            16 => Some(0xd8),
            _ => None,
        };
        match fixed {
            Some(marker) => self.out.push(marker),
            None => self.write_len(ext.data.len(), None, [0xc7, 0xc8, 0xc9]),
        }
        self.out.push(tag);
        self.out.extend_from_slice(&ext.data);
    }
}
