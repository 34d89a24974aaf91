use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsforge_ast::{BindingName, Expression, NodeFactory, SourceFile, Statement, SyntaxKind};
use tsforge_core::{CompilerArena, StringInterner};
use tsforge_printer::{NoopHandlers, NullResolver, Printer, PrinterOptions, SourceMapTarget};
use tsforge_sourcemap::SourceMapGenerator;

const FUNCTIONS: usize = 500;

/// `function fN(a: number, b: number): number { return a + b; }`
fn function<'a>(f: &NodeFactory<'a>, index: usize) -> Statement<'a> {
    let number = || f.create_keyword_type_node(SyntaxKind::NumberKeyword);
    let param = |name: &str| {
        f.create_parameter_declaration(false, BindingName::Identifier(f.create_identifier(name)), false, Some(number()), None)
    };
    let sum = f.create_binary(
        Expression::Identifier(f.create_identifier("a")),
        SyntaxKind::PlusToken,
        Expression::Identifier(f.create_identifier("b")),
    );
    let body = f.create_block(vec![f.create_return(Some(sum))], true);
    f.create_function_declaration(
        false,
        Some(f.create_identifier(&format!("f{index}"))),
        None,
        vec![param("a"), param("b")],
        Some(number()),
        Some(body),
    )
}

fn build<'a>(f: &NodeFactory<'a>) -> &'a SourceFile<'a> {
    f.begin_source_file();
    let statements = (0..FUNCTIONS).map(|i| function(f, i)).collect();
    f.create_source_file("bench.ts", "", statements)
}

fn bench_print(c: &mut Criterion) {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let file = build(&f);
    let options = || PrinterOptions {
        strip_types: true,
        ..Default::default()
    };

    c.bench_function("print_functions", |b| {
        b.iter(|| {
            let mut printer = Printer::new(f.interner(), options(), &NullResolver, Box::new(NoopHandlers));
            black_box(printer.print_file(black_box(file)));
        });
    });

    c.bench_function("print_functions_with_source_map", |b| {
        b.iter(|| {
            let mut printer = Printer::new(f.interner(), options(), &NullResolver, Box::new(NoopHandlers));
            let target = SourceMapTarget::new(SourceMapGenerator::new("bench.js".to_string()));
            black_box(printer.write_file(black_box(file), Some(target)));
        });
    });
}

criterion_group!(benches, bench_print);
criterion_main!(benches);
