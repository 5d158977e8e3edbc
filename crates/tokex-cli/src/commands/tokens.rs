use std::path::PathBuf;

use tokex_lib::{Colors, tokenize};

use super::run_common;

pub struct TokensArgs {
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: TokensArgs) {
    let input =
        run_common::load_input_or_exit(args.input_text.as_deref(), args.input_path.as_deref(), None);
    let colors = Colors::new(args.color);

    for token in tokenize(&input) {
        if args.spans {
            let (start, end) = token.span;
            println!("{}{start}..{end}{} {}", colors.dim, colors.reset, token.text);
        } else {
            println!("{}", token.text);
        }
    }
}
