use soroban_sdk::{contracttype, Address, String};

/// Entry identity: the writing contract's namespace plus its own key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryKey {
    pub owner: Address,
    pub key: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// owner + key -> i128
    Balance(EntryKey),
    /// owner + key -> Bytes
    Record(EntryKey),
}
