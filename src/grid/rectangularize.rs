// Delimiters are counted literally, quoted or not.
pub fn rectangularize(text: &str, delimiter: char) -> String {
    let max_delimiters = text
        .split_inclusive('\n')
        .map(|line| count_delimiters(line, delimiter))
        .max()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        out.push_str(body);

        let missing = max_delimiters - count_delimiters(body, delimiter);
        out.extend(std::iter::repeat_n(delimiter, missing));
        out.push_str(terminator);
    }

    out
}

fn count_delimiters(line: &str, delimiter: char) -> usize {
    line.chars().filter(|ch| *ch == delimiter).count()
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
