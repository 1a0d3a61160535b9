use std::io::{BufRead, Write};

use faqbot_core::config::ChatSettings;
use faqbot_core::traits::Responder;

/// Printed when the session ends without the exit command (EOF or Ctrl-C).
pub fn write_exit_notice<O: Write + ?Sized>(output: &mut O) -> std::io::Result<()> {
    writeln!(output, "\nExiting...")?;
    output.flush()
}

/// Reads one question per line until the exit command or end of input.
///
/// Every line other than the exit command is answered, empty lines included.
/// Returns the number of answered turns. Only I/O errors end the loop early.
pub fn run_chat<R, I, O>(responder: &R, chat: &ChatSettings, mut input: I, output: &mut O) -> anyhow::Result<usize>
where
    R: Responder + ?Sized,
    I: BufRead,
    O: Write,
{
    let mut turns = 0;
    let mut line = Vec::new();
    loop {
        write!(output, "{}: ", chat.user_label)?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            write_exit_notice(output)?;
            break;
        }
        let text = String::from_utf8_lossy(&line);
        let query = text.trim_end_matches(['\r', '\n']);

        if query.eq_ignore_ascii_case(&chat.exit_command) {
            writeln!(output, "Goodbye!")?;
            break;
        }

        let reply = responder.answer(query);
        writeln!(output, "{}: {}\n", chat.bot_label, reply)?;
        turns += 1;
    }
    Ok(turns)
}
