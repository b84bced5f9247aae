pub mod climate;
pub mod radiation;
pub mod site;
