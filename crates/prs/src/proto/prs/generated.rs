#![allow(missing_docs)]
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Parameters {
    #[prost(uint32, tag = "1")]
    pub message_bits: u32,
    #[prost(uint32, tag = "2")]
    pub modulus_bits: u32,
    #[prost(uint32, tag = "3")]
    pub base_size: u32,
    #[prost(uint32, tag = "4")]
    pub primality_rounds: u32,
    #[prost(uint64, tag = "5")]
    pub max_attempts: u64,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublicKey {
    #[prost(bytes = "vec", tag = "1")]
    pub n: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub y: ::prost::alloc::vec::Vec<u8>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ciphertext {
    #[prost(bytes = "vec", tag = "1")]
    pub c: ::prost::alloc::vec::Vec<u8>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HssConfig {
    #[prost(uint32, tag = "1")]
    pub num_servers: u32,
    #[prost(uint32, tag = "2")]
    pub arity: u32,
    #[prost(message, optional, tag = "3")]
    pub params: ::core::option::Option<Parameters>,
}
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PartialResult {
    #[prost(uint32, tag = "1")]
    pub server: u32,
    #[prost(message, optional, tag = "2")]
    pub ciphertext: ::core::option::Option<Ciphertext>,
}
