use clap::Args;
use folio_models::contact::FormFields;

pub mod compose;
pub mod rate_limit;
pub mod send;
pub mod validate;

#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Name of the sender
    #[arg(short, long)]
    pub name: String,
    /// Email address of the sender
    #[arg(short, long)]
    pub email: String,
    /// The message to send
    #[arg(short, long)]
    pub message: String,
}

impl From<FieldArgs> for FormFields {
    fn from(args: FieldArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            message: args.message,
        }
    }
}
