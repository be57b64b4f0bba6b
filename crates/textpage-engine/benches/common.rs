// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_note(sections: usize) -> String {
    let base = "# Title\n\nParagraph with **bold**, *italic*, `code` and a [link](https://example.com).\n\n- bullet one\n- bullet two\n\n1. first\n2. second\n\n> A quote\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(sections)
}

#[allow(dead_code)]
pub fn generate_cjk_note(paragraphs: usize) -> String {
    let mut content = String::from("# 周报\n\n");
    for i in 0..paragraphs {
        content.push_str(&format!("第{i}段：这是一个**重要**的段落。包含`代码`和列表。\n- 项目\n\n"));
    }
    content
}
