// src/core.rs
//
// O motor de cálculo e agregação: funções puras, sem I/O, sem relógio
// ambiente. Tudo que os handlers e serviços devolvem de "número" nasce
// aqui.

pub mod agregado;
pub mod calculo;
pub mod cronograma;
pub mod export;
pub mod filtro;
pub mod normalizador;
pub mod numerico;
