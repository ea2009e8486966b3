use std::hash::BuildHasher;
use std::hash::RandomState;

use chain_hash::HashTable;
use chain_hash::hash_table::Entry;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of values to insert.
    #[arg(short = 'n', long = "values", default_value_t = 1000)]
    values: u64,

    /// Share of the values to remove again, between 0 and 1.
    #[arg(short = 'r', long = "remove_fraction", default_value_t = 0.0)]
    remove_fraction: f64,

    /// Reserve room for every value up front instead of growing on demand.
    #[arg(long)]
    preallocate: bool,
}

fn print_histogram(table: &HashTable<u64>) {
    println!("=== Chain Length Histogram ===");
    let hist = table.chain_histogram();
    let widest = hist.iter().copied().max().unwrap_or(0).max(1);
    for (len, count) in hist.iter().enumerate() {
        let bar = "#".repeat(count * 50 / widest);
        println!("{len:>3}: {count:>8} {bar}");
    }
}

fn main() {
    let args = Args::parse();
    let state = RandomState::new();

    let mut table: HashTable<u64> = if args.preallocate {
        HashTable::with_capacity(args.values as usize)
    } else {
        HashTable::new()
    };
    println!("Initial capacity: {}", table.capacity());

    for value in 0..args.values {
        match table.entry(state.hash_one(value), |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => panic!("Value already exists in table: {value}"),
        }
    }

    println!("Inserted {} values", table.len());
    println!(
        "Capacity after inserts: {} (load factor {:.2}%)",
        table.capacity(),
        table.load_factor() * 100.0
    );

    let to_remove = (args.values as f64 * args.remove_fraction.clamp(0.0, 1.0)) as u64;
    for value in 0..to_remove {
        if table.remove(state.hash_one(value), |&v| v == value).is_none() {
            panic!("Value missing from table: {value}");
        }
    }
    if to_remove > 0 {
        println!(
            "Removed {} values; capacity now {} (load factor {:.2}%)",
            to_remove,
            table.capacity(),
            table.load_factor() * 100.0
        );
    }

    print_histogram(&table);
    table.debug_stats().print();
}
