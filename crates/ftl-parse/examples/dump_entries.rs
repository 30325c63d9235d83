use std::io::Read;

use ftl_parse::{Entry, WalkItem, parse, walk};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)
        .expect("read stdin");

    let resource = parse(&source);

    println!("=== Entries ===");
    for entry in &resource.body {
        match entry.id() {
            Some(id) => println!("{}: {:?}", id.name, entry),
            None => println!("{:?}", entry),
        }
    }

    println!("\n=== Walk ===");
    for item in walk(&source, &resource) {
        println!("{:?} {:?}", item.span(), item.all(&source));
    }

    println!("\n=== Errors ===");
    for entry in &resource.body {
        if let Entry::Junk(junk) = entry {
            for annotation in &junk.annotations {
                eprintln!("{}", annotation.render("<stdin>", &source));
            }
        }
    }

    let words: usize = walk(&source, &resource)
        .map(|item| match item {
            WalkItem::Message { message, .. } => message.count_words(),
            WalkItem::Term { term, .. } => term.count_words(),
            _ => 0,
        })
        .sum();
    println!("\n{} words", words);
}
