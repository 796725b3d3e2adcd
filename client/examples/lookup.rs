use anyhow::Result;
use rotom_client::{DexClient, DexHandle, DexHandler, Pokemon};

/// One-shot lookup: submit a name directly, print its card, exit.
struct OneShot {
    handle: DexHandle,
}

impl DexHandler for OneShot {
    async fn on_loading(&mut self, loading: bool) {
        if !loading {
            let _ = self.handle.shutdown();
        }
    }

    async fn on_detail(&mut self, pokemon: &Pokemon) {
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
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(name) = std::env::args().nth(1) else {
        eprintln!("Usage: lookup <name>");
        std::process::exit(2);
    };

    let client = DexClient::new();
    let handle = client.handle();

    let mut handler = OneShot {
        handle: handle.clone(),
    };

    handle.select(&name)?;
    client.run(&mut handler).await
}
