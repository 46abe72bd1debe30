// SPDX-License-Identifier: (MIT OR Apache-2.0)

use tri_ast::command::{Command, CommandKind};
use tri_ast::decl::{Decl, DeclKind};
use tri_ast::expr::{Expr, ExprKind, Param, ParamKind};
use tri_ast::Program;

use crate::config::FormatConfig;

pub struct Printer<'a> {
    output: String,
    indent: usize,
    config: &'a FormatConfig,
}

impl<'a> Printer<'a> {
    pub fn new(config: &'a FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            config,
        }
    }

    pub fn finish(mut self) -> String {
        // Ensure trailing newline
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Start a new line at the current indentation.
    fn emit_line_start(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let spaces = self.indent * self.config.indent_width;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    // --- Commands ---

    pub fn format_program(&mut self, program: &Program) {
        self.format_command(&program.command);
    }

    /// Print a command in a position that accepts a full sequence.
    fn format_command(&mut self, cmd: &Command) {
        let mut items = Vec::new();
        flatten_sequence(cmd, &mut items);

        let last = items.len() - 1;
        for (i, item) in items.iter().enumerate() {
            if i < last && is_open_ended(item) {
                // A trailing continuation would swallow the rest of the sequence
                self.format_wrapped(item);
            } else {
                self.format_single(item);
            }
            if i < last {
                self.emit(";");
            }
        }
    }

    /// Print a command in a single-command position.
    fn format_single_position(&mut self, cmd: &Command) {
        if matches!(cmd.kind, CommandKind::Sequential { .. }) {
            self.format_wrapped(cmd);
        } else {
            self.format_single(cmd);
        }
    }

    fn format_wrapped(&mut self, cmd: &Command) {
        self.emit_line_start();
        self.emit("begin");
        self.indented(|p| p.format_command(cmd));
        self.emit_line_start();
        self.emit("end");
    }

    fn format_single(&mut self, cmd: &Command) {
        match &cmd.kind {
            CommandKind::Assign { target, value } => {
                self.emit_line_start();
                self.emit(&target.name);
                self.emit(" = ");
                self.format_expr(value);
            }
            CommandKind::Call { callee, param } => {
                self.emit_line_start();
                self.emit(&callee.name);
                self.emit("(");
                self.format_param(param);
                self.emit(")");
            }
            CommandKind::If { cond, then_branch, else_branch } => {
                self.emit_line_start();
                self.emit("if ");
                self.format_expr(cond);
                self.emit(" then");
                self.indented(|p| p.format_single_position(then_branch));
                self.emit_line_start();
                self.emit("else");
                self.indented(|p| p.format_single_position(else_branch));
            }
            CommandKind::While { cond, body, rest } => {
                self.emit_line_start();
                self.emit("while ");
                self.format_expr(cond);
                self.emit(" do");
                self.indented(|p| p.format_command(body));
                self.emit_line_start();
                self.emit("wend");
                self.format_command(rest);
            }
            CommandKind::DoWhile { body, cond } => {
                self.emit_line_start();
                self.emit("do");
                self.indented(|p| p.format_single_position(body));
                self.emit_line_start();
                self.emit("wendwhile ");
                self.format_expr(cond);
            }
            CommandKind::Let { decl, body, rest } => {
                self.emit_line_start();
                self.emit("let");
                self.indented(|p| p.format_decl(decl));
                self.emit_line_start();
                self.emit("in");
                self.indented(|p| p.format_single_position(body));
                self.emit_line_start();
                self.emit("endlet");
                self.format_command(rest);
            }
            CommandKind::Sequential { .. } => self.format_wrapped(cmd),
            CommandKind::Blank => {
                self.emit_line_start();
                self.emit("pass");
            }
            CommandKind::Error => {
                self.emit_line_start();
                self.emit("<error>");
            }
        }
    }

    fn format_param(&mut self, param: &Param) {
        match &param.kind {
            ParamKind::Expr(expr) => self.format_expr(expr),
            ParamKind::Var(ident) => {
                self.emit("var ");
                self.emit(&ident.name);
            }
            ParamKind::Blank => {}
            ParamKind::Error => self.emit("<error>"),
        }
    }

    // --- Declarations ---

    fn format_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Const { name, value } => {
                self.emit_line_start();
                self.emit("const ");
                self.emit(&name.name);
                self.emit(" ~ ");
                self.format_expr(value);
            }
            DeclKind::Var { name, ty } => {
                self.emit_line_start();
                self.emit("var ");
                self.emit(&name.name);
                self.emit(" ");
                self.emit(&ty.name.name);
            }
            DeclKind::Sequential { first, second } => {
                self.format_decl(first);
                self.emit(";");
                self.format_decl(second);
            }
            DeclKind::Error => {
                self.emit_line_start();
                self.emit("<error>");
            }
        }
    }

    // --- Expressions ---

    fn format_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, lhs, rhs } => {
                self.format_expr(lhs);
                self.emit(" ");
                self.emit(&op.spelling);
                self.emit(" ");
                self.format_operand(rhs);
            }
            ExprKind::Unary { op, operand } => {
                self.emit(&op.spelling);
                self.emit(" ");
                self.format_operand(operand);
            }
            ExprKind::Int(spelling) => self.emit(spelling),
            ExprKind::Char(c) => {
                self.emit("'");
                self.output.push(*c);
                self.emit("'");
            }
            ExprKind::Ident(ident) => self.emit(&ident.name),
            ExprKind::Error => self.emit("<error>"),
        }
    }

    /// Print an expression that must parse back as a primary.
    fn format_operand(&mut self, expr: &Expr) {
        if matches!(expr.kind, ExprKind::Binary { .. }) {
            self.emit("(");
            self.format_expr(expr);
            self.emit(")");
        } else {
            self.format_expr(expr);
        }
    }
}

/// Collect the commands of a left-nested sequence in order.
///
/// Only the `first` side is flattened, matching how the parser nests a `;`
/// list. A sequence in a `second` position stays one item and is printed
/// inside `begin`/`end`.
fn flatten_sequence<'c>(cmd: &'c Command, out: &mut Vec<&'c Command>) {
    match &cmd.kind {
        CommandKind::Sequential { first, second } => {
            flatten_sequence(first, out);
            out.push(second);
        }
        _ => out.push(cmd),
    }
}

/// Whether a command ends in a trailing command continuation.
fn is_open_ended(cmd: &Command) -> bool {
    match &cmd.kind {
        CommandKind::Let { .. } | CommandKind::While { .. } => true,
        CommandKind::If { else_branch, .. } => is_open_ended(else_branch),
        _ => false,
    }
}
