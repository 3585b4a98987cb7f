//! Header layouts of the monitored spreadsheets.
//!
//! Header strings must match the existing spreadsheets exactly (after
//! whitespace normalization); they are the contract with the people who
//! maintain those files.

use intake_model::fields;

/// Mapping from source headers to canonical field names.
#[derive(Debug, Clone, Copy)]
pub struct SourceLayout {
    pub columns: &'static [(&'static str, &'static str)],
    /// Fields whose column must be present for the source to be usable.
    pub required: &'static [&'static str],
}

impl SourceLayout {
    #[must_use]
    pub fn header_for(&self, field: &str) -> Option<&'static str> {
        self.columns
            .iter()
            .find(|(_, f)| *f == field)
            .map(|(header, _)| *header)
    }

    /// Headers in layout order, for writing a fresh table.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(header, _)| *header).collect()
    }
}

pub const STUDENTS: SourceLayout = SourceLayout {
    columns: &[
        ("Nome do Estudante", fields::NAME),
        ("E-mail do Aluno", fields::EMAIL),
        ("Série do Aluno", fields::GRADE),
        ("Número de Presença do Estudante", fields::ROLL_NUMBER),
        ("Cep do Estudante", fields::POSTAL_CODE),
        ("Rua/Av do Estudante", fields::STREET),
        ("Bairro do Estudante", fields::DISTRICT),
        ("Número Endereço do Estudante", fields::STREET_NUMBER),
        ("Cidade do Estudante", fields::CITY),
    ],
    required: &[fields::NAME],
};

pub const REGISTRATIONS: SourceLayout = SourceLayout {
    columns: &[
        ("Digite o nome completo do cliente", fields::NAME),
        ("Digite o e-mail do cliente:", fields::EMAIL),
    ],
    required: &[fields::NAME],
};

pub const CUSTOMERS: SourceLayout = SourceLayout {
    columns: &[
        ("Digite o nome completo do cliente", fields::NAME),
        ("CPF Cliente", fields::CPF),
        ("Telefone Cliente", fields::PHONE),
        ("Endereço completo Cliente", fields::ADDRESS),
    ],
    required: &[fields::NAME],
};

pub const STORES: SourceLayout = SourceLayout {
    columns: &[
        ("COD", fields::CODE),
        ("Nome oficial", fields::NAME),
        ("ENDEREÇO", fields::ADDRESS),
        ("CEP", fields::POSTAL_CODE),
        ("Telefone", fields::PHONE),
        ("Região IM", fields::REGION),
        ("NM_DIST", fields::DISTRICT),
        ("NM_MUN", fields::MUNICIPALITY),
        ("NM_MESO", fields::MESOREGION),
        ("SIGLA_UF", fields::STATE),
        ("Região_Geográfica", fields::GEOGRAPHIC_REGION),
        ("LAT", fields::LATITUDE),
        ("LONG", fields::LONGITUDE),
    ],
    required: &[fields::NAME],
};

pub const PRODUCTS: SourceLayout = SourceLayout {
    columns: &[
        ("NomeProduto", fields::NAME),
        ("_CodigoReferenciaProduto", fields::CODE),
        ("RANGE MAX_1", fields::WEIGHT),
    ],
    required: &[fields::NAME, fields::CODE],
};

pub const PRICES: SourceLayout = SourceLayout {
    columns: &[
        ("Cod Produto", fields::CODE),
        ("Preço Negócio - Atual", fields::PRICE),
    ],
    required: &[fields::CODE, fields::PRICE],
};

pub const SALES: SourceLayout = SourceLayout {
    columns: &[
        ("ID_Pedido", fields::ORDER_ID),
        ("Data_Pedido", fields::PLACED_AT),
        ("Sala_Aluno", fields::STUDENT_ROOM),
        ("Nome_Aluno", fields::STUDENT_NAME),
        ("Email_Aluno", fields::STUDENT_EMAIL),
        ("Nome_Cliente", fields::CUSTOMER_NAME),
        ("Email_Cliente", fields::CUSTOMER_EMAIL),
        ("CPF_Cliente", fields::CUSTOMER_CPF),
        ("Telefone_Cliente", fields::CUSTOMER_PHONE),
        ("Tipo_Entrega", fields::DELIVERY_TYPE),
        ("Loja_Retirada", fields::PICKUP_STORE),
        ("Endereco_Loja_Retirada", fields::PICKUP_STORE_ADDRESS),
        ("Endereco_Completo", fields::DELIVERY_ADDRESS),
        ("Data_Entrega", fields::DELIVERY_DATE),
        ("Condicao_Entrega", fields::DELIVERY_CONDITION),
        ("Forma_Pagamento", fields::PAYMENT_METHOD),
        ("Itens_JSON", fields::ITEMS),
        ("Valor_Total", fields::TOTAL),
        ("Observacoes", fields::NOTES),
    ],
    required: &[fields::ORDER_ID],
};
