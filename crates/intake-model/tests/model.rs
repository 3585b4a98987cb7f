use intake_model::{EntityKind, NewOrder, RawRecord, SalesQuery, SourceNames, ValidationError};

#[test]
fn order_payload_deserializes_from_form_json() {
    let payload = r#"{
        "aluno": {"nome": "Ana Costa", "sala": "2B", "email": "ana.costa@escola.edu.br"},
        "cliente": {"nome": "Juliana Santos Rodrigues", "email": "juliana.rodrigues@email.com"},
        "entrega": {"tipo": "retirada_mercado_jf", "loja": "Loja Shopping Morumbi"},
        "pagamento": {"forma": "pix"},
        "itens": [{"produto": "Pizza Margherita", "quantidade": 2}],
        "valorTotal": 65.0
    }"#;
    let order: NewOrder = serde_json::from_str(payload).expect("parse order");
    assert_eq!(order.student.room, "2B");
    assert_eq!(order.customer.cpf, "");
    assert!(order.delivery.is_store_pickup());
    assert_eq!(order.items.len(), 1);
    assert!((order.total - 65.0).abs() < f64::EPSILON);
    assert_eq!(order.notes, "");
}

#[test]
fn raw_record_distinguishes_blank_from_absent() {
    let record = RawRecord::new().with("email", "");
    assert!(record.has("email"));
    assert_eq!(record.get("email"), Some(""));
    assert!(!record.has("cpf"));
    assert_eq!(record.text("cpf"), "");
}

#[test]
fn validation_error_displays_row_and_messages() {
    let error = ValidationError {
        kind: EntityKind::Student,
        source: "B_Alunos.csv".to_string(),
        row: 4,
        messages: vec![
            "invalid email: joao@".to_string(),
            "invalid postal code: 123".to_string(),
        ],
    };
    assert_eq!(
        error.to_string(),
        "row 4: invalid email: joao@; invalid postal code: 123"
    );
}

#[test]
fn sales_query_accepts_form_parameter_names() {
    let query: SalesQuery =
        serde_json::from_str(r#"{"nome_aluno": "ana", "data_inicio": "2025-01-01"}"#)
            .expect("parse query");
    assert_eq!(
        query,
        SalesQuery::new().student_name("ana").date_from("2025-01-01")
    );
}

#[test]
fn every_source_is_monitored_once() {
    let names = SourceNames::default();
    let mut all = names.all().to_vec();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 7);
    for kind in EntityKind::ALL {
        for source in kind.sources(&names) {
            assert!(all.contains(&source), "{kind} source {source} not monitored");
        }
    }
}
