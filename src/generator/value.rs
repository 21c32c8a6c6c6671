use std::fmt;

/// An operand of an emitted instruction. Bit count is either 1 (booleans,
/// the result of a comparison) or 32 (everything else): the only two
/// widths this language's IR ever deals in.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Register { name: String, bits: u8, global: bool },
    ImmediateInt32(i32),
    /// Reserved for 1-bit immediates. The source language has no boolean
    /// literal syntax, so the generator never actually constructs one —
    /// every 1-bit value in practice comes from an `icmp`.
    ImmediateBool(bool),
}

impl Value {
    pub fn bits(&self) -> u8 {
        match self {
            Value::Register { bits, .. } => *bits,
            Value::ImmediateInt32(_) => 32,
            Value::ImmediateBool(_) => 1,
        }
    }

    /// The LLVM type keyword for this value's width.
    pub fn llvm_type(&self) -> &'static str {
        if self.bits() == 1 { "i1" } else { "i32" }
    }

    /// The operand as it's spelled inline in an instruction: `%name`,
    /// `@name`, or a bare decimal literal.
    pub fn text(&self) -> String {
        match self {
            Value::Register { name, global, .. } => {
                format!("{}{}", if *global { "@" } else { "%" }, name)
            }
            Value::ImmediateInt32(n) => n.to_string(),
            Value::ImmediateBool(b) => if *b { "1" } else { "0" }.to_string(),
        }
    }

    pub fn local_register(name: impl Into<String>, bits: u8) -> Value {
        Value::Register { name: name.into(), bits, global: false }
    }

    pub fn global_register(name: impl Into<String>, bits: u8) -> Value {
        Value::Register { name: name.into(), bits, global: true }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
