mod common;

use common::{file_store, month};
use expense_core::{
    core::LedgerManager,
    ledger::{Category, EntryType},
    storage::{
        import_legacy_expenses,
        legacy::{parse_legacy_document, read_legacy_expenses},
        MemoryStore, LEGACY_STORAGE_KEY,
    },
};

const EXPORT: &str = r#"[
    {"data":"2024-01-05","descricao":"Mercado","categoria":"Groceries","pagamento":"Pix","valor":100},
    {"data":"2024-01-20","descricao":"","categoria":"Feira","pagamento":"","valor":"35,50"},
    {"data":"2024-02-01","descricao":"Aluguel","categoria":"Rent","pagamento":"Boleto","valor":1500},
    {"data":"","descricao":"Sem data","valor":10},
    {"data":"2024-02-02","descricao":"Zero","valor":0}
]"#;

#[test]
fn import_groups_entries_by_month() {
    let (mut store, _) = file_store();
    let report = import_legacy_expenses(&mut store, parse_legacy_document(EXPORT)).unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.months, vec![month("2024-01"), month("2024-02")]);

    let january = store.load(&month("2024-01"));
    assert_eq!(january.rows.len(), 2);
    assert!(january.rows.iter().all(|row| row.kind == EntryType::Expense));
    assert_eq!(january.rows[1].description, "Sem descrição");
    assert_eq!(january.rows[1].category, Some(Category::Other));
    assert_eq!(january.rows[1].amount, Some(35.5));
    assert_eq!(january.rows[1].payment, None);
    assert_eq!(store.load(&month("2024-02")).rows[0].payment.as_deref(), Some("Boleto"));
}

#[test]
fn importing_twice_skips_duplicates() {
    let (mut store, _) = file_store();
    import_legacy_expenses(&mut store, parse_legacy_document(EXPORT)).unwrap();
    let again = import_legacy_expenses(&mut store, parse_legacy_document(EXPORT)).unwrap();
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 5);
    assert!(again.months.is_empty());
    assert_eq!(store.load(&month("2024-01")).rows.len(), 2);
}

#[test]
fn entries_can_be_read_from_a_key_value_store() {
    let backend = MemoryStore::with_entry(LEGACY_STORAGE_KEY, EXPORT);
    assert_eq!(read_legacy_expenses(&backend).len(), 5);
    assert!(read_legacy_expenses(&MemoryStore::new()).is_empty());
}

#[test]
fn manager_refreshes_the_active_month_after_import() {
    let (store, _) = file_store();
    let mut manager = LedgerManager::new(store, month("2024-01"));
    manager.add_blank_row();
    let report = manager.import_legacy(parse_legacy_document(EXPORT)).unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(manager.rows().len(), 3);
    assert!(manager.rows()[2].is_empty());
    assert_eq!(manager.totals().expense, 135.5);
}
