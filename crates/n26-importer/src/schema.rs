//! Column layouts of N26 CSV exports.
//!
//! N26 translates the header row into the account's language and has
//! changed the layout over time. Each [`HeaderSchema`] is one known
//! (language, layout) pair: an ordered list of column labels keyed by the
//! [`FieldKey`] they carry.

use std::fmt;

/// Semantic meaning of a statement column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Booking date.
    Date,
    /// Value date (updated layout only).
    ValueDate,
    /// Counterparty name.
    Payee,
    /// Counterparty account number / IBAN.
    AccountNumber,
    /// Kind of transaction (card payment, transfer, ...).
    TransactionType,
    /// Free-text payment reference.
    PaymentReference,
    /// Name of the N26 (sub-)account (updated layout only).
    AccountName,
    /// N26 spending category.
    Category,
    /// Amount in the account's home currency.
    AmountEur,
    /// Amount in the original currency.
    AmountForeignCurrency,
    /// Original currency code.
    TypeForeignCurrency,
    /// Exchange rate applied by the bank.
    ExchangeRate,
}

impl FieldKey {
    /// Snake-case identifier of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::ValueDate => "value_date",
            Self::Payee => "payee",
            Self::AccountNumber => "account_number",
            Self::TransactionType => "transaction_type",
            Self::PaymentReference => "payment_reference",
            Self::AccountName => "account_name",
            Self::Category => "category",
            Self::AmountEur => "amount_eur",
            Self::AmountForeignCurrency => "amount_foreign_currency",
            Self::TypeForeignCurrency => "type_foreign_currency",
            Self::ExchangeRate => "exchange_rate",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version of the export layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Ten-column export with a category column.
    Legacy,
    /// Export with booking/value dates and partner columns.
    Updated,
}

/// One column of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    /// What the column holds.
    pub key: FieldKey,
    /// Exact header label.
    pub label: &'static str,
    /// Whether exports may omit the column.
    pub optional: bool,
}

const fn field(key: FieldKey, label: &'static str) -> HeaderField {
    HeaderField {
        key,
        label,
        optional: false,
    }
}

const fn optional(key: FieldKey, label: &'static str) -> HeaderField {
    HeaderField {
        key,
        label,
        optional: true,
    }
}

/// A known header layout for one language.
#[derive(Debug, PartialEq, Eq)]
pub struct HeaderSchema {
    /// Language code (e.g. "en").
    pub language: &'static str,
    /// Layout version.
    pub layout: Layout,
    /// Columns in file order.
    pub fields: &'static [HeaderField],
}

impl HeaderSchema {
    /// All labels in file order.
    fn labels(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.label).collect()
    }

    /// Labels in file order with optional columns left out.
    fn required_labels(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| !f.optional)
            .map(|f| f.label)
            .collect()
    }

    /// Header variants this layout can appear as: the full label list, then
    /// the list without optional columns when that differs.
    pub fn variants(&self) -> Vec<Vec<&'static str>> {
        let full = self.labels();
        let required = self.required_labels();
        if required == full {
            vec![full]
        } else {
            vec![full, required]
        }
    }

    /// Label of the column holding `key`, if this layout has one.
    pub fn label(&self, key: FieldKey) -> Option<&'static str> {
        self.fields.iter().find(|f| f.key == key).map(|f| f.label)
    }
}

static EN_LEGACY: &[HeaderField] = &[
    field(FieldKey::Date, "Date"),
    field(FieldKey::Payee, "Payee"),
    field(FieldKey::AccountNumber, "Account number"),
    field(FieldKey::TransactionType, "Transaction type"),
    field(FieldKey::PaymentReference, "Payment reference"),
    optional(FieldKey::Category, "Category"),
    field(FieldKey::AmountEur, "Amount (EUR)"),
    field(FieldKey::AmountForeignCurrency, "Amount (Foreign Currency)"),
    field(FieldKey::TypeForeignCurrency, "Type Foreign Currency"),
    field(FieldKey::ExchangeRate, "Exchange Rate"),
];

static EN_UPDATED: &[HeaderField] = &[
    field(FieldKey::Date, "Booking Date"),
    field(FieldKey::ValueDate, "Value Date"),
    field(FieldKey::Payee, "Partner Name"),
    field(FieldKey::AccountNumber, "Partner Iban"),
    field(FieldKey::TransactionType, "Type"),
    field(FieldKey::PaymentReference, "Payment Reference"),
    field(FieldKey::AccountName, "Account Name"),
    field(FieldKey::AmountEur, "Amount (EUR)"),
    field(FieldKey::AmountForeignCurrency, "Original Amount"),
    field(FieldKey::TypeForeignCurrency, "Original Currency"),
    field(FieldKey::ExchangeRate, "Exchange Rate"),
];

static DE_LEGACY: &[HeaderField] = &[
    field(FieldKey::Date, "Datum"),
    field(FieldKey::Payee, "Empfänger"),
    field(FieldKey::AccountNumber, "Kontonummer"),
    field(FieldKey::TransactionType, "Transaktionstyp"),
    field(FieldKey::PaymentReference, "Verwendungszweck"),
    optional(FieldKey::Category, "Kategorie"),
    field(FieldKey::AmountEur, "Betrag (EUR)"),
    field(FieldKey::AmountForeignCurrency, "Betrag (Fremdwährung)"),
    field(FieldKey::TypeForeignCurrency, "Fremdwährung"),
    field(FieldKey::ExchangeRate, "Wechselkurs"),
];

static FR_LEGACY: &[HeaderField] = &[
    field(FieldKey::Date, "Date"),
    field(FieldKey::Payee, "Bénéficiaire"),
    field(FieldKey::AccountNumber, "Numéro de compte"),
    field(FieldKey::TransactionType, "Type de transaction"),
    field(FieldKey::PaymentReference, "Référence de paiement"),
    optional(FieldKey::Category, "Catégorie"),
    field(FieldKey::AmountEur, "Montant (EUR)"),
    field(FieldKey::AmountForeignCurrency, "Montant (Devise étrangère)"),
    field(FieldKey::TypeForeignCurrency, "Sélectionnez la devise étrangère"),
    field(FieldKey::ExchangeRate, "Taux de conversion"),
];

/// Every known layout, in resolution order.
pub static SCHEMAS: &[HeaderSchema] = &[
    HeaderSchema {
        language: "en",
        layout: Layout::Legacy,
        fields: EN_LEGACY,
    },
    HeaderSchema {
        language: "en",
        layout: Layout::Updated,
        fields: EN_UPDATED,
    },
    HeaderSchema {
        language: "de",
        layout: Layout::Legacy,
        fields: DE_LEGACY,
    },
    HeaderSchema {
        language: "fr",
        layout: Layout::Legacy,
        fields: FR_LEGACY,
    },
];

/// Layouts defined for `language`, in definition order.
pub fn schemas_for(language: &str) -> impl Iterator<Item = &'static HeaderSchema> + '_ {
    SCHEMAS.iter().filter(move |s| s.language == language)
}

/// Whether any layout exists for `language`.
pub fn is_language_supported(language: &str) -> bool {
    schemas_for(language).next().is_some()
}
