/// Template written by `reroute --init`. Parses to the built-in layout.
const PLAN_TEMPLATE: &str = r#"# reroute plan
#
# Every key is optional; omitted keys keep the built-in layout shown here.
# Paths are relative to the site root and may not leave it.

# HTML pages moved out of the root (index.html stays put).
pages-dir = "pages"
pages = [
    "reportes.html",
    "configuracion.html",
    "inventario.html",
    "CXP.html",
    "CXC.html",
    "diesel.html",
    "facturacion.html",
    "logistica.html",
    "mantenimiento.html",
    "operadores.html",
    "trafico.html",
    "tesoreria.html",
    "menu.html",
    "demo.html",
    "tests.html",
    "dashboard-integrado.html",
    "sincronizacion.html",
    "admin-licencias.html",
]

# Deployment scripts.
deploy-dir = "scripts/deploy"
deploy-scripts = [
    "deploy.ps1",
    "deploy-simple.ps1",
    "ejecutar-deploy.ps1",
    "verificar-deploy.ps1",
]

# Documentation archived by file-name glob. Only files directly inside
# `from` are considered.
archive-dir = "docs/archive"

[[archive]]
from = "."
patterns = [
    "REFACTORIZACION_*.md",
    "LINEAS_EXACTAS_*.md",
    "LISTA_LINEAS_ELIMINAR.txt",
    "ERRORES_Y_PRUEBAS.md",
    "ERP_STATE_MIGRATION.md",
]

[[archive]]
from = "docs"
patterns = ["REFACTORIZACION_*.md"]

# Image folders merged; existing files in `into` are never overwritten.
# Set `enabled = false` to leave both folders alone.
[images]
enabled = true
from = "assets/images"
into = "assets/img"
"#;

/// Generate the `.reroute.toml` template.
pub fn generate_plan_template() -> &'static str {
	PLAN_TEMPLATE
}
