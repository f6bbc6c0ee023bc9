//! Replies sent over the FTP control channel.

/// A reply to the FTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    CodeAndMsg { code: ReplyCode, msg: String },
    MultiLine { code: ReplyCode, lines: Vec<String> },
}

/// The reply codes according to RFC 959.
//
// The three digits form a code: the hundreds digit classifies the reply
// (1 = preliminary, 2 = success, 3 = intermediate, 4 = transient failure,
// 5 = permanent failure). Clients are not supposed to look past the first
// digit, but the exact codes below are the ones RFC 959 permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
#[allow(dead_code)]
pub enum ReplyCode {
    FileStatusOkay = 150,

    CommandOkay = 200,
    SystemStatus = 211,
    SystemType = 215,
    ServiceReady = 220,
    ClosingControlConnection = 221,
    ClosingDataConnection = 226,
    EnteringPassiveMode = 227,
    UserLoggedIn = 230,
    FileActionOkay = 250,
    DirCreated = 257,

    NeedPassword = 331,
    FileActionPending = 350,

    ServiceNotAvailable = 421,
    CantOpenDataConnection = 425,

    CommandSyntaxError = 500,
    BadCommandSequence = 503,
    NotLoggedIn = 530,
    FileError = 550,
    BadFileName = 553,
}

impl Reply {
    pub fn new(code: ReplyCode, message: &str) -> Self {
        Reply::CodeAndMsg {
            code,
            msg: message.to_string(),
        }
    }

    pub fn new_with_string(code: ReplyCode, msg: String) -> Self {
        Reply::CodeAndMsg { code, msg }
    }

    pub fn new_multiline<I>(code: ReplyCode, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        Reply::MultiLine {
            code,
            lines: lines.into_iter().map(|item| format!("{}", item)).collect(),
        }
    }

    /// The reply rendered line by line, without line terminators. Used for
    /// mirroring replies into the log; the wire framing itself is produced
    /// by the codec.
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            Reply::CodeAndMsg { code, msg } => vec![format!("{:03} {}", *code as u32, msg)],
            Reply::MultiLine { code, lines } => {
                let code = *code as u32;
                if let [line] = lines.as_slice() {
                    return vec![format!("{:03} {}", code, line)];
                }
                let mut out = Vec::with_capacity(lines.len());
                for (i, line) in lines.iter().enumerate() {
                    if i == 0 {
                        out.push(format!("{:03}-{}", code, line));
                    } else if i + 1 == lines.len() {
                        out.push(format!("{:03} {}", code, line));
                    } else {
                        out.push(format!(" {}", line));
                    }
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_rendering() {
        let reply = Reply::new(ReplyCode::UserLoggedIn, "Login successful.");
        assert_eq!(reply.to_lines(), vec!["230 Login successful."]);
    }

    #[test]
    fn multi_line_rendering() {
        let reply = Reply::new_multiline(ReplyCode::SystemStatus, vec!["Features:", "PASV", "End"]);
        assert_eq!(reply.to_lines(), vec!["211-Features:", " PASV", "211 End"]);
    }
}
