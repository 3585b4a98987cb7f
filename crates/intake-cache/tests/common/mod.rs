#![allow(dead_code)]

use std::sync::Arc;

use intake_cache::{CacheConfig, RecordingSink, ReferenceCache};
use intake_ingest::{MemoryStore, Table};

pub const STUDENTS: &str = "B_Alunos.csv";
pub const REGISTRATIONS: &str = "Base_cadastos.csv";
pub const CUSTOMERS: &str = "Base Clientes.csv";
pub const STORES: &str = "B_Lojas.csv";
pub const PRODUCTS: &str = "Base_Produtos.csv";
pub const PRICES: &str = "B_Precos.csv";
pub const SALES: &str = "Base_Vendas.csv";

pub fn students(rows: &[[&str; 2]]) -> Table {
    Table::new(
        ["Nome do Estudante", "E-mail do Aluno"],
        rows.iter().map(|row| row.to_vec()),
    )
}

pub fn sales(rows: &[[&str; 3]]) -> Table {
    Table::new(
        ["ID_Pedido", "Data_Pedido", "Nome_Aluno"],
        rows.iter().map(|row| row.to_vec()),
    )
}

/// A store holding every source with a little data.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.put(
        STUDENTS,
        students(&[
            ["João Silva", "joao.silva@escola.edu.br"],
            ["Maria Santos", "maria.santos@escola.edu.br"],
        ]),
    );
    store.put(
        REGISTRATIONS,
        Table::new(
            ["Digite o nome completo do cliente", "Digite o e-mail do cliente:"],
            [["Ana", "a@x.com"]],
        ),
    );
    store.put(
        CUSTOMERS,
        Table::new(
            [
                "Digite o nome completo do cliente",
                "CPF Cliente",
                "Telefone Cliente",
                "Endereço completo Cliente",
            ],
            [["Ana", "12345678901", "(11) 98765-4321", "Rua das Flores, 123"]],
        ),
    );
    store.put(
        STORES,
        Table::new(
            ["COD", "Nome oficial", "ENDEREÇO", "Telefone"],
            [
                ["L01", "Loja Centro", "Rua Direita, 10", "(11) 3333-4444"],
                ["L02", "Loja Shopping Morumbi", "Av. Roque Petroni Jr, 1089", ""],
            ],
        ),
    );
    store.put(
        PRODUCTS,
        Table::new(
            ["NomeProduto", "_CodigoReferenciaProduto", "RANGE MAX_1"],
            [["Pizza Margherita", "X1", "500g"], ["Torta de Frango", "Y9", "1kg"]],
        ),
    );
    store.put(
        PRICES,
        Table::new(["Cod Produto", "Preço Negócio - Atual"], [["X1", "12,50"]]),
    );
    store.put(
        SALES,
        sales(&[
            ["A1B2C3D4", "2025-01-01 10:00:00", "Ana Costa"],
            ["FFEE0011", "2025-01-31 18:30:00", "Bruno Lima"],
        ]),
    );
    store
}

pub fn config(check_interval_secs: u64) -> CacheConfig {
    CacheConfig {
        check_interval_secs,
        ..CacheConfig::default()
    }
}

pub fn cache_over(
    store: &Arc<MemoryStore>,
    check_interval_secs: u64,
) -> (ReferenceCache, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let cache = ReferenceCache::new(store.clone(), sink.clone(), config(check_interval_secs));
    (cache, sink)
}
