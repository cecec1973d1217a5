//! Text assembly without an allocator.
//!
//! Composite ledger keys and explanatory messages are built in a fixed-size
//! stack buffer and only then copied into a host `String`.

use core::fmt;

use soroban_sdk::{Env, String};

pub struct TextBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> TextBuf<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Appends `bytes` entirely or not at all.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        let end = self.len + bytes.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    /// Appends the contents of a host string.
    pub fn push_string(&mut self, s: &String) -> fmt::Result {
        let end = self.len + s.len() as usize;
        if end > N {
            return Err(fmt::Error);
        }
        s.copy_into_slice(&mut self.buf[self.len..end]);
        self.len = end;
        Ok(())
    }

    /// Appends `text` followed by a newline. Display text may be cut short
    /// when the buffer is full.
    pub fn line(&mut self, text: &str) {
        if self.push_bytes(text.as_bytes()).is_ok() {
            let _ = self.push_bytes(b"\n");
        }
    }

    pub fn finish(&self, env: &Env) -> String {
        String::from_bytes(env, self.as_bytes())
    }
}

impl<const N: usize> fmt::Write for TextBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes())
    }
}

/// Copies a host string into `buf` and views it as UTF-8.
pub fn read_str<'a>(s: &String, buf: &'a mut [u8]) -> Option<&'a str> {
    let len = s.len() as usize;
    if len > buf.len() {
        return None;
    }
    let slot = &mut buf[..len];
    s.copy_into_slice(slot);
    core::str::from_utf8(slot).ok()
}

/// Minor currency units rendered with two decimals, e.g. `5000` as `50.00`.
pub struct Money(pub i128);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
