pub mod vineyard;
