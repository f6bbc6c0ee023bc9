//! One module per FTP verb.

pub mod cdup;
pub mod cwd;
pub mod dele;
pub mod feat;
pub mod list;
pub mod mkd;
pub mod pass;
pub mod pasv;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod rmd;
pub mod rnfr;
pub mod rnto;
pub mod stor;
pub mod syst;
pub mod type_;
pub mod user;

pub use cdup::Cdup;
pub use cwd::Cwd;
pub use dele::Dele;
pub use feat::Feat;
pub use list::List;
pub use mkd::Mkd;
pub use pass::Pass;
pub use pasv::Pasv;
pub use pwd::Pwd;
pub use quit::Quit;
pub use retr::Retr;
pub use rmd::Rmd;
pub use rnfr::Rnfr;
pub use rnto::Rnto;
pub use stor::Stor;
pub use syst::Syst;
pub use type_::Type;
pub use user::User;
