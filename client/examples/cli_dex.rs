use std::sync::{Arc, Mutex};

use anyhow::Result;
use rotom_client::{DexClient, DexHandle, DexHandler, Pokemon, Suggestion};
use tokio::io::{AsyncBufReadExt, BufReader};

struct CliDex {
    // Latest suggestion names, for /pick by number
    suggestions: Arc<Mutex<Vec<String>>>,
}

impl DexHandler for CliDex {
    async fn on_suggestions(&mut self, suggestions: &[Suggestion]) {
        let names: Vec<String> = suggestions.iter().map(|s| s.name.clone()).collect();

        if !names.is_empty() {
            println!("Suggestions:");
            for (index, name) in names.iter().enumerate() {
                println!("  {}. {}", index + 1, name);
            }
        }

        if let Ok(mut latest) = self.suggestions.lock() {
            *latest = names;
        }
    }

    async fn on_loading(&mut self, loading: bool) {
        if loading {
            println!("Loading...");
        }
    }

    async fn on_detail(&mut self, pokemon: &Pokemon) {
        print_card(pokemon);
    }
}

fn print_card(pokemon: &Pokemon) {
    println!();
    println!("{}", pokemon.name.to_uppercase());
    if let Some(sprite) = &pokemon.sprites.front_default {
        println!("Sprite: {}", sprite);
    }
    println!("Height: {}", pokemon.height);
    println!("Weight: {}", pokemon.weight);
    if let Some(base_experience) = pokemon.base_experience {
        println!("Base Experience: {}", base_experience);
    }
    println!("Abilities:");
    for slot in &pokemon.abilities {
        println!("  - {}", slot.ability.name);
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  <text>          - Search the catalog as you type");
    println!("  /pick <n|name>  - Fetch details for a suggestion or name");
    println!("  /help           - Show this help");
    println!("  /quit           - Exit");
}

async fn handle_input(
    line: &str,
    handle: &DexHandle,
    suggestions: &Arc<Mutex<Vec<String>>>,
) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }

    if let Some(rest) = line.strip_prefix('/') {
        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        let cmd = parts[0];
        let arg = parts.get(1).map(|s| s.trim());

        match cmd {
            "help" => print_help(),
            "pick" => {
                let Some(arg) = arg else {
                    println!("Usage: /pick <number|name>");
                    return true;
                };

                let name = match arg.parse::<usize>() {
                    Ok(index) => suggestions
                        .lock()
                        .ok()
                        .and_then(|latest| latest.get(index.wrapping_sub(1)).cloned()),
                    Err(_) => Some(arg.to_string()),
                };

                match name {
                    Some(name) => {
                        if let Err(e) = handle.select(&name) {
                            println!("Error: {}", e);
                        }
                    }
                    None => println!("No suggestion #{}", arg),
                }
            }
            "quit" | "exit" => return false,
            _ => println!("Unknown command: /{}. Type /help for commands.", cmd),
        }
    } else if let Err(e) = handle.set_query(line) {
        println!("Error: {}", e);
    }

    true
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("Pokédex Search");
    println!("==============");
    print_help();
    println!();

    let client = DexClient::new();
    let handle = client.handle();
    let suggestions: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let mut handler = CliDex {
        suggestions: suggestions.clone(),
    };

    // Spawn input handler
    let input_handle = handle.clone();
    let input_suggestions = suggestions.clone();
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if !handle_input(&line, &input_handle, &input_suggestions).await {
                break;
            }
        }

        let _ = input_handle.shutdown();
    });

    // Run the client
    client.run(&mut handler).await
}
