//! The RFC 959 Representation Type (`TYPE`) command.
//
// Only `I` (image/binary) and `A` (ASCII) are accepted. The chosen type
// is remembered for the transfer replies but the server is transparent in
// both: no line-ending translation is ever performed.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};
use crate::server::session::TransferType;

use async_trait::async_trait;

#[derive(Debug)]
pub struct Type {
    param: String,
}

impl Type {
    pub fn new(param: String) -> Self {
        Type { param }
    }
}

#[async_trait]
impl CommandHandler for Type {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        match self.param.chars().next() {
            Some('I') | Some('i') => {
                args.session.transfer_type = TransferType::Binary;
                Ok(Reply::new(ReplyCode::CommandOkay, "Switching to Binary mode."))
            }
            Some('A') | Some('a') => {
                args.session.transfer_type = TransferType::Ascii;
                Ok(Reply::new(ReplyCode::CommandOkay, "Switching to ASCII mode."))
            }
            _ => Ok(Reply::new(ReplyCode::CommandSyntaxError, "Unrecognized TYPE command.")),
        }
    }
}
