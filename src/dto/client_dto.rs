use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, RE_DNI};

// Alta y modificación de cliente. La clasificación cambia sólo con las ventas.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientRequest {
    #[validate(
        length(max = 80, message = "El nombre no puede superar 80 caracteres"),
        custom = "validate_not_blank"
    )]
    pub first_name: String,
    #[validate(
        length(max = 80, message = "El apellido no puede superar 80 caracteres"),
        custom = "validate_not_blank"
    )]
    pub last_name: String,
    #[validate(regex(path = "RE_DNI", message = "El DNI debe tener 7 u 8 dígitos"))]
    pub dni: String,
    #[validate(length(max = 30, message = "Teléfono demasiado largo"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[validate(length(max = 200, message = "Dirección demasiado larga"))]
    pub address: Option<String>,
}

impl ClientRequest {
    pub fn normalized(mut self) -> Self {
        self.dni = self.dni.trim().replace('.', "");
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        self
    }
}

// Búsqueda del listado: ?buscar= sobre nombre, apellido o DNI
#[derive(Debug, Default, Deserialize)]
pub struct ClientFilter {
    pub buscar: Option<String>,
}
