//! Thin syntactic writer: one method per LLVM-IR instruction or structural
//! token (labels, function headers). Performs no validation — it writes
//! whatever it's told. All register-numbering, bit-width and symbol-table
//! reasoning lives in `crate::generator`; this module only knows how to
//! spell things.

use std::io::{self, Write};

use crate::generator::value::Value;

/// All instruction lines are indented with one tab; labels are not.
pub struct Emitter<'w> {
    out: &'w mut dyn Write,
}

impl<'w> Emitter<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        Emitter { out }
    }

    fn instr(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "\t{line}")
    }

    pub fn preamble(&mut self, source_name: &str) -> io::Result<()> {
        writeln!(self.out, "source_filename = \"{source_name}\"")?;
        writeln!(self.out, "target triple = \"x86_64-pc-linux-gnu\"")?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "@print_int_fstring = private unnamed_addr constant [4 x i8] c\"%d\\0A\\00\""
        )?;
        writeln!(self.out)
    }

    pub fn postamble(&mut self) -> io::Result<()> {
        writeln!(self.out, "declare i32 @printf(i8*, ...)")
    }

    pub fn function_start(&mut self, name: &str, params: &[Value]) -> io::Result<()> {
        let params_text: Vec<String> =
            params.iter().map(|p| format!("i32 {}", p.text())).collect();
        writeln!(self.out, "define i32 @{name}({}) {{", params_text.join(", "))
    }

    pub fn function_end(&mut self) -> io::Result<()> {
        writeln!(self.out, "}}")
    }

    pub fn label(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "{label}:")
    }

    pub fn alloca(&mut self, dest: &Value) -> io::Result<()> {
        self.instr(&format!("{} = alloca i32", dest.text()))
    }

    pub fn store(&mut self, value: &Value, ptr: &Value) -> io::Result<()> {
        self.instr(&format!(
            "store {} {}, i32* {}",
            value.llvm_type(),
            value.text(),
            ptr.text()
        ))
    }

    pub fn load(&mut self, dest: &Value, ptr: &Value) -> io::Result<()> {
        self.instr(&format!("{} = load i32, i32* {}", dest.text(), ptr.text()))
    }

    pub fn zext_to_i32(&mut self, dest: &Value, src: &Value) -> io::Result<()> {
        self.instr(&format!("{} = zext i1 {} to i32", dest.text(), src.text()))
    }

    pub fn icmp_ne_zero(&mut self, dest: &Value, src: &Value) -> io::Result<()> {
        self.instr(&format!("{} = icmp ne i32 {}, 0", dest.text(), src.text()))
    }

    /// Arithmetic: `add`/`sub`/`mul` carry `nsw`, `sdiv`/`srem` don't (and
    /// neither checks its divisor — spec.md §9 preserves that as-is).
    pub fn arith(&mut self, dest: &Value, mnemonic: &str, nsw: bool, lhs: &Value, rhs: &Value) -> io::Result<()> {
        if nsw {
            self.instr(&format!(
                "{} = {mnemonic} nsw i32 {}, {}",
                dest.text(),
                lhs.text(),
                rhs.text()
            ))
        } else {
            self.instr(&format!("{} = {mnemonic} i32 {}, {}", dest.text(), lhs.text(), rhs.text()))
        }
    }

    pub fn icmp(&mut self, dest: &Value, cond: &str, lhs: &Value, rhs: &Value) -> io::Result<()> {
        self.instr(&format!(
            "{} = icmp {cond} i32 {}, {}",
            dest.text(),
            lhs.text(),
            rhs.text()
        ))
    }

    pub fn branch(&mut self, label: &str) -> io::Result<()> {
        self.instr(&format!("br label %{label}"))
    }

    pub fn branch_cond(&mut self, cond: &Value, then_label: &str, else_label: &str) -> io::Result<()> {
        self.instr(&format!(
            "br i1 {}, label %{then_label}, label %{else_label}",
            cond.text()
        ))
    }

    pub fn call(&mut self, dest: &Value, callee: &str, args: &[Value]) -> io::Result<()> {
        let args_text: Vec<String> = args.iter().map(|a| format!("i32 {}", a.text())).collect();
        self.instr(&format!(
            "{} = call i32 @{callee}({})",
            dest.text(),
            args_text.join(", ")
        ))
    }

    pub fn ret(&mut self, value: &Value) -> io::Result<()> {
        self.instr(&format!("ret i32 {}", value.text()))
    }

    pub fn printf_call(&mut self, dest: &Value, value: &Value) -> io::Result<()> {
        self.instr(&format!(
            "{} = call i32(i8*, ...) @printf(i8* bitcast ([4 x i8]* @print_int_fstring to i8*), i32 {})",
            dest.text(),
            value.text()
        ))
    }
}
