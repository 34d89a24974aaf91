//! Maps produced here must decode with an independent consumer.

use sourcemap::SourceMap;
use tsforge_sourcemap::SourceMapGenerator;

fn decode(generator: &SourceMapGenerator) -> SourceMap {
    SourceMap::from_slice(generator.to_json().as_bytes()).expect("valid source map")
}

// ============================================================================
// Mappings
// ============================================================================

#[test]
fn test_tokens_decode_to_recorded_positions() {
    let mut generator = SourceMapGenerator::new("out.js".to_string());
    let src = generator.add_source("src/a.ts".to_string());
    generator.add_simple_mapping(0, 0, src, 0, 0);
    generator.add_simple_mapping(0, 9, src, 0, 13);
    generator.add_simple_mapping(3, 2, src, 5, 4);

    let map = decode(&generator);
    let token = map.lookup_token(0, 9).expect("token at 0:9");
    assert_eq!(token.get_src_line(), 0);
    assert_eq!(token.get_src_col(), 13);
    assert_eq!(token.get_source(), Some("src/a.ts"));

    let token = map.lookup_token(3, 2).expect("token at 3:2");
    assert_eq!(token.get_src_line(), 5);
    assert_eq!(token.get_src_col(), 4);
    assert_eq!(map.get_token_count(), 3);
}

#[test]
fn test_source_switches_between_files() {
    let mut generator = SourceMapGenerator::new("bundle.js".to_string());
    let a = generator.add_source("a.ts".to_string());
    let b = generator.add_source("b.ts".to_string());
    generator.add_simple_mapping(0, 0, a, 0, 0);
    generator.add_simple_mapping(1, 0, b, 0, 0);
    generator.add_simple_mapping(2, 0, a, 1, 0);

    let map = decode(&generator);
    let sources: Vec<_> = map.tokens().map(|t| t.get_source().map(str::to_string)).collect();
    assert_eq!(
        sources,
        vec![Some("a.ts".to_string()), Some("b.ts".to_string()), Some("a.ts".to_string())]
    );
}

#[test]
fn test_named_mapping_round_trips_name() {
    let mut generator = SourceMapGenerator::new("out.js".to_string());
    let src = generator.add_source("a.ts".to_string());
    let name = generator.add_name("value".to_string());
    generator.add_named_mapping(0, 6, src, 0, 6, name);

    let map = decode(&generator);
    let token = map.lookup_token(0, 6).expect("token");
    assert_eq!(token.get_name(), Some("value"));
}

// ============================================================================
// Document
// ============================================================================

#[test]
fn test_sources_content_is_embedded() {
    let mut generator = SourceMapGenerator::new("out.js".to_string());
    generator.add_source_with_content("a.ts".to_string(), "let a = 1;".to_string());
    let map = decode(&generator);
    assert_eq!(map.get_source_contents(0), Some("let a = 1;"));
}

#[test]
fn test_data_url_decodes() {
    let mut generator = SourceMapGenerator::new("out.js".to_string());
    let src = generator.add_source("a.ts".to_string());
    generator.add_simple_mapping(0, 0, src, 0, 0);

    let url = generator.to_data_url();
    let encoded = url
        .strip_prefix("data:application/json;base64,")
        .expect("data url prefix");
    assert_eq!(encoded, tsforge_sourcemap::base64_encode(generator.to_json().as_bytes()));
    assert_eq!(encoded.len() % 4, 0);
}
