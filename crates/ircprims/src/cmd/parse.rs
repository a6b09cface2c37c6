use ircprims_frame::Message;

use crate::cmd::ParseArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_message, OutputFormat};

pub fn run(args: ParseArgs, format: OutputFormat) -> CliResult<i32> {
    let line = args.line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(CliError::new(DATA_INVALID, "line must not be empty"));
    }
    if line.contains(['\0', '\r', '\n']) {
        return Err(CliError::new(
            DATA_INVALID,
            "line must not contain NUL, CR or LF",
        ));
    }

    let message = Message::parse(line);
    print_message(&message, format);
    Ok(SUCCESS)
}
