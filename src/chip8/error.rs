use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Chip8Error {
    Io(std::io::Error),
    ProgramTooLarge { size: usize, max: usize },
    StackUnderflow { pc: u16, opcode: u16 },
    CallDepthExceeded { pc: u16, opcode: u16, limit: usize },
    UnrecognizedInstruction { pc: u16, opcode: u16 },
    InvalidArgument(&'static str),
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::ProgramTooLarge { size, max } => {
                write!(f, "program too large: {size} bytes (max {max})")
            }
            Self::StackUnderflow { pc, opcode } => {
                write!(
                    f,
                    "return with empty call stack at 0x{pc:03x} (opcode 0x{opcode:04x})"
                )
            }
            Self::CallDepthExceeded { pc, opcode, limit } => {
                write!(
                    f,
                    "call stack limit {limit} exceeded at 0x{pc:03x} (opcode 0x{opcode:04x})"
                )
            }
            Self::UnrecognizedInstruction { pc, opcode } => {
                write!(f, "unrecognized instruction 0x{opcode:04x} at 0x{pc:03x}")
            }
            Self::InvalidArgument(argument) => write!(f, "invalid argument: {argument}"),
        }
    }
}

impl std::error::Error for Chip8Error {}

impl From<std::io::Error> for Chip8Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
