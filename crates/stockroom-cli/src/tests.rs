use super::*;
use stockroom_core::{SortKey, Status, StatusFilter};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["stockroom"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.base_url.is_none());
}

#[test]
fn parses_shell_with_base_url_override() {
    let cli = Cli::try_parse_from(["stockroom", "--base-url", "http://inv.local/api", "shell"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Shell)));
    assert_eq!(cli.base_url.as_deref(), Some("http://inv.local/api"));
}

#[test]
fn base_url_is_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(["stockroom", "stores", "list", "--base-url", "http://x/api"])
        .expect("expected valid cli args");
    assert_eq!(cli.base_url.as_deref(), Some("http://x/api"));
}

#[test]
fn parses_stores_search() {
    let cli = Cli::try_parse_from(["stockroom", "stores", "search", "main st"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Stores {
            command: StoresCommands::Search { ref text }
        }) if text == "main st"
    ));
}

#[test]
fn parses_stores_create_flags() {
    let cli = Cli::try_parse_from([
        "stockroom",
        "stores",
        "create",
        "--name",
        "Downtown",
        "--email",
        "shop@example.com",
        "--phone-number",
        "555-0100",
        "--address",
        "1 Main St",
        "--established",
        "2020-01-15",
        "--floor-area",
        "120",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Stores {
            command: StoresCommands::Create { ref floor_area, ref phone_number, .. }
        }) if floor_area == "120" && phone_number == "555-0100"
    ));
}

#[test]
fn stores_create_requires_every_field() {
    let result = Cli::try_parse_from(["stockroom", "stores", "create", "--name", "Downtown"]);
    assert!(result.is_err());
}

#[test]
fn parses_stores_delete_id() {
    let cli = Cli::try_parse_from(["stockroom", "stores", "delete", "4"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Stores {
            command: StoresCommands::Delete { id: 4 }
        })
    ));
}

#[test]
fn parses_products_list_status_filter() {
    let cli = Cli::try_parse_from(["stockroom", "products", "list", "3", "--status", "storage"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::List {
                store: 3,
                status: Some(StatusFilter::Only(Status::Storage))
            }
        })
    ));
}

#[test]
fn rejects_unknown_status_filter() {
    let result = Cli::try_parse_from(["stockroom", "products", "list", "3", "--status", "sold"]);
    assert!(result.is_err());
}

#[test]
fn parses_products_sort_descending() {
    let cli = Cli::try_parse_from(["stockroom", "products", "sort", "2", "price", "--descending"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::Sort {
                store: 2,
                column: SortKey::Price,
                descending: true
            }
        })
    ));
}

#[test]
fn products_create_defaults_status_to_ok() {
    let cli = Cli::try_parse_from([
        "stockroom",
        "products",
        "create",
        "1",
        "--name",
        "Phone",
        "--price",
        "199.99",
        "--specs",
        "6in",
        "--rating",
        "4",
        "--supplier-info",
        "Acme",
        "--country",
        "Japan",
        "--company",
        "Acme Co",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::Create { store: 1, ref status, .. }
        }) if status == "OK"
    ));
}

#[test]
fn parses_products_delete() {
    let cli = Cli::try_parse_from(["stockroom", "products", "delete", "1", "9"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::Delete { store: 1, id: 9 }
        })
    ));
}

#[test]
fn products_rejects_store_id_zero() {
    let result = Cli::try_parse_from(["stockroom", "products", "list", "0"]);
    assert!(result.is_err());
}

#[test]
fn stores_delete_rejects_non_numeric_id() {
    let result = Cli::try_parse_from(["stockroom", "stores", "delete", "first"]);
    assert!(result.is_err());
}
