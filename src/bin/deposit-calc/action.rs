use std::path::PathBuf;

use deposit_calc::deposits::RawApplicationInput;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub enum Action {
    Calc {
        input: RawApplicationInput,
        format: OutputFormat,
    },
    Request {
        path: Option<PathBuf>,
    },
}
