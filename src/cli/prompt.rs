//! Terminal input helpers: yes/no prompting and comma-separated lists.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

/// Interpret a yes/no reply. Accepts yes/no/y/n in any case.
pub fn parse_yes_no(reply: &str) -> Option<bool> {
    match reply.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Ask one question until a recognised reply is entered.
///
/// Returns `None` when input ends before a valid reply.
pub fn ask_yes_no<R, W>(question: &str, input: &mut R, output: &mut W) -> io::Result<Option<bool>>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{question} (yes/no): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }
        if let Some(answer) = parse_yes_no(&line) {
            return Ok(Some(answer));
        }
        writeln!(output, "Please answer yes or no (y/n).")?;
    }
}

/// Ask every question in order. Once input ends, the remaining questions
/// are recorded as "no" without prompting.
pub fn ask_all<'a, I, R, W>(questions: I, input: &mut R, output: &mut W) -> io::Result<Vec<(String, bool)>>
where
    I: IntoIterator<Item = &'a str>,
    R: BufRead,
    W: Write,
{
    let mut answers = Vec::new();
    let mut exhausted = false;
    for question in questions {
        let answer = if exhausted {
            false
        } else {
            match ask_yes_no(question, input, output)? {
                Some(answer) => answer,
                None => {
                    exhausted = true;
                    false
                }
            }
        };
        answers.push((question.to_string(), answer));
    }
    Ok(answers)
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn parse_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
