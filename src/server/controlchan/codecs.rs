//! The tokio codec for the control channel: lines in, framed replies out.

use super::error::ControlChanError;
use super::reply::Reply;

use bytes::{Buf, BytesMut};
use std::io::Write;
use std::str;
use tokio_util::codec::{Decoder, Encoder};

// FtpCodec implements tokio's `Decoder` and `Encoder` traits for the
// control channel. Decoding yields one command line at a time, terminated
// by the first CR, LF, or CRLF; the terminator is stripped. Encoding
// renders a `Reply` in RFC 959 framing with CRLF line endings.
pub struct FtpCodec {
    // Index of the next byte to examine for a line terminator, so that
    // repeated `decode` calls don't rescan the unterminated prefix.
    next_index: usize,
}

impl FtpCodec {
    pub fn new() -> Self {
        FtpCodec { next_index: 0 }
    }

    fn take_line(&mut self, buf: &mut BytesMut, line_len: usize, term_len: usize) -> Result<String, ControlChanError> {
        let line = buf.split_to(line_len);
        buf.advance(term_len);
        self.next_index = 0;
        Ok(str::from_utf8(&line)?.to_string())
    }
}

impl Decoder for FtpCodec {
    type Item = String;
    type Error = ControlChanError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        let offset = buf[self.next_index..]
            .iter()
            .position(|b| *b == b'\r' || *b == b'\n');
        match offset {
            Some(offset) => {
                let at = self.next_index + offset;
                if buf[at] == b'\n' {
                    return Ok(Some(self.take_line(buf, at, 1)?));
                }
                // A CR: we need the next byte to know whether it is part of
                // a CRLF pair.
                if at + 1 == buf.len() {
                    self.next_index = at;
                    return Ok(None);
                }
                let term_len = if buf[at + 1] == b'\n' { 2 } else { 1 };
                Ok(Some(self.take_line(buf, at, term_len)?))
            }
            None => {
                self.next_index = buf.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, Self::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        // A trailing CR with nothing after it terminates the final line;
        // anything else left over is an unterminated fragment and is
        // dropped, like a line cut off by the peer hanging up.
        if buf.last() == Some(&b'\r') {
            let line_len = buf.len() - 1;
            let line = self.take_line(buf, line_len, 1)?;
            return Ok(Some(line));
        }
        buf.clear();
        self.next_index = 0;
        Ok(None)
    }
}

impl Encoder<Reply> for FtpCodec {
    type Error = ControlChanError;

    fn encode(&mut self, reply: Reply, buf: &mut BytesMut) -> Result<(), Self::Error> {
        let mut buffer = vec![];
        match reply {
            Reply::CodeAndMsg { code, msg } => {
                if msg.is_empty() {
                    write!(buffer, "{:03}\r\n", code as u32)?;
                } else {
                    write!(buffer, "{:03} {}\r\n", code as u32, msg)?;
                }
            }
            Reply::MultiLine { code, mut lines } => {
                let code = code as u32;
                let last_line = lines.pop().unwrap_or_default();
                if lines.is_empty() {
                    write!(buffer, "{:03} {}\r\n", code, last_line)?;
                } else {
                    write!(buffer, "{:03}-{}\r\n", code, lines.remove(0))?;
                    for line in lines {
                        write!(buffer, " {}\r\n", line)?;
                    }
                    write!(buffer, "{:03} {}\r\n", code, last_line)?;
                }
            }
        }
        buf.extend(&buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::controlchan::reply::ReplyCode;
    use pretty_assertions::assert_eq;

    fn decode_all(codec: &mut FtpCodec, buf: &mut BytesMut) -> Vec<String> {
        let mut out = vec![];
        while let Some(line) = codec.decode(buf).unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn decode_crlf_and_lf() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from(&b"USER x\r\nPASS y\nQUIT\r\n"[..]);
        assert_eq!(decode_all(&mut codec, &mut buf), vec!["USER x", "PASS y", "QUIT"]);
    }

    #[test]
    fn decode_bare_cr_terminates() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from(&b"SYST\rPWD\r\n"[..]);
        assert_eq!(decode_all(&mut codec, &mut buf), vec!["SYST", "PWD"]);
    }

    #[test]
    fn decode_cr_split_across_reads() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from(&b"SYST\r"[..]);
        // The CR could be half of a CRLF; the codec must wait for one more
        // byte before deciding.
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"\nPWD\r\n");
        assert_eq!(decode_all(&mut codec, &mut buf), vec!["SYST", "PWD"]);
    }

    #[test]
    fn decode_eof_with_trailing_cr() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from(&b"QUIT\r"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("QUIT".to_string()));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn decode_eof_drops_fragment() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::from(&b"USE"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn encode_single_line() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::new();
        codec
            .encode(Reply::new(ReplyCode::UserLoggedIn, "Login successful."), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"230 Login successful.\r\n");
    }

    #[test]
    fn encode_multi_line() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::new();
        codec
            .encode(
                Reply::new_multiline(ReplyCode::SystemStatus, vec!["Features:", "PASV", "End"]),
                &mut buf,
            )
            .unwrap();
        assert_eq!(&buf[..], b"211-Features:\r\n PASV\r\n211 End\r\n");
    }

    #[test]
    fn encode_zero_pads_code() {
        let mut codec = FtpCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(Reply::new(ReplyCode::CommandOkay, "ok"), &mut buf).unwrap();
        assert!(buf.starts_with(b"200 "));
    }
}
