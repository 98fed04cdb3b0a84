pub mod alloy;
pub mod test_node;

pub type AlloyProvider = ::alloy::providers::DynProvider;
