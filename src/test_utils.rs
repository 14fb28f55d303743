use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::Module;
use swc_core::ecma::codegen::{text_writer::JsWriter, Config, Emitter};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

fn parse_with(syntax: Syntax, name: &str, code: &str) -> (Module, Lrc<SourceMap>) {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(Lrc::new(FileName::Custom(name.into())), code.to_string());
    let lexer = Lexer::new(syntax, Default::default(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module().expect("failed to parse module");
    assert!(parser.take_errors().is_empty());
    (module, cm)
}

pub fn parse_module(code: &str) -> (Module, Lrc<SourceMap>) {
    parse_with(
        Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        "App.jsx",
        code,
    )
}

pub fn parse_ts_module(code: &str) -> (Module, Lrc<SourceMap>) {
    parse_with(
        Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        "App.tsx",
        code,
    )
}

pub fn print_module(cm: &Lrc<SourceMap>, module: &Module) -> String {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: Config::default(),
            comments: None,
            cm: cm.clone(),
            wr: writer,
        };
        emitter
            .emit_module(module)
            .expect("failed to emit transformed module");
    }
    String::from_utf8(buf).expect("module is not valid UTF-8")
}

/// Printed code with all whitespace removed, so layout choices of the
/// emitter do not matter.
pub fn squash(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}
