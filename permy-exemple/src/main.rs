use permy_core::CompiledGrammar;
use permy_core::dictionary::{Dictionary, Mode, SuggestInput, insert_completion};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Compile a script: each group is an independent choice, concatenated left to right
    let grammar = CompiledGrammar::compile("I (like|love) (cats|dogs|birds)")?;

    // Every string the grammar can produce, in a stable order
    for (i, sentence) in grammar.enumerate()?.iter().enumerate() {
        println!("{}: {}", i + 1, sentence);
    }

    // One string, chosen uniformly at each decision point
    println!("Sampled: {}", grammar.sample()?);

    // Prebuilt structures skip the parser: named branches, continuations and inline scripts
    let prebuilt = CompiledGrammar::compile(json!({
        "main": [{"branch": "greet", "then": [" ", {"script": "(friend|stranger)"}]}],
        "greet": ["hi", "hello"],
    }))?;
    println!("Prebuilt: {:?}", prebuilt.enumerate()?);

    // Errors are values: malformed syntax, unknown branches and cycles are reported
    match CompiledGrammar::compile("(a|b") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }
    let cyclic = CompiledGrammar::compile(json!({"main": ["x", {"branch": "main"}]}))?;
    match cyclic.enumerate() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }

    // Load the typeahead dictionary (a .bin cache is written beside it on first load)
    let dictionary = Dictionary::new("./data/en.json")?;
    println!("Loaded {} entries from {:?}", dictionary.len(), dictionary.get_names());

    // Look up a completion for the last words typed
    let text = "Yesterday I really like";
    let mut input = SuggestInput::new(Mode::All);
    input.set_max_results(Some(5))?;
    match dictionary.suggest(text, &input)? {
        Some(suggestion) => {
            println!("Key '{}' matched {} word(s)", suggestion.key, suggestion.matched_words);
            for completion in &suggestion.completions {
                println!("  {}", insert_completion(text, completion));
            }
        }
        None => println!("No suggestion for '{text}'"),
    }

    Ok(())
}
