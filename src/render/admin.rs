use maud::{html, Markup};

use super::{base_document, escaped, format_date, sanitized, Head, Widget};
use crate::{
    models::article::Article,
    view::{AdminForm, ArticleDraft, FormMode},
};

const QUILL_CSS: &str = "https://cdn.jsdelivr.net/npm/quill@1.3.7/dist/quill.snow.css";
const QUILL_JS: &str = "https://cdn.jsdelivr.net/npm/quill@1.3.7/dist/quill.min.js";
const EDITOR_JS: &str = "/js/admin-editor.js";
const DELETE_CONFIRM: &str = "return confirm('¿Seguro que deseas eliminar esta noticia?')";

fn news_row(item: &Article) -> Markup {
    html! {
        tr {
            td { (format_date(&item.created_at)) }
            td { (escaped(item.title())) }
            td { (sanitized(item.encabezado())) }
            td { (sanitized(item.description())) }
            td {
                @if !item.image_url().is_empty() {
                    img src=(escaped(item.image_url())) width="80" style="border-radius:6px;";
                }
            }
            td { @if item.is_featured { "✅" } @else { "❌" } }
            td { @if item.is_photo_of_week { "📷" } @else { "—" } }
            td {
                a class="edit-btn" href={ "/admin/edit/" (item.id) } { "✏️ Editar" }
                form class="inline" method="post" action={ "/admin/delete/" (item.id) } onsubmit=(DELETE_CONFIRM) {
                    button class="delete-btn" type="submit" { "🗑️ Eliminar" }
                }
            }
        }
    }
}

fn news_table(table: &Widget<Vec<Article>>) -> Markup {
    html! {
        table id="news-table" {
            thead {
                tr {
                    th { "Fecha" }
                    th { "Título" }
                    th { "Encabezado" }
                    th { "Descripción" }
                    th { "Imagen" }
                    th { "Destacada" }
                    th { "Foto semana" }
                    th { "Acciones" }
                }
            }
            tbody {
                @match table {
                    Widget::Ready(rows) => {
                        @for item in rows {
                            (news_row(item))
                        }
                    }
                    Widget::Failed => {
                        tr { td colspan="8" class="placeholder" { "No se pudieron cargar las noticias." } }
                    }
                }
            }
        }
    }
}

// Los campos enriquecidos viajan como HTML en un <textarea>; el editor se monta encima
fn rich_field(name: &str, label: &str, placeholder: &str, value: &str) -> Markup {
    html! {
        label for=(name) { (label) }
        div id={ (name) "-editor" } class="rich-editor" data-target=(name) data-placeholder=(placeholder) {}
        textarea id=(name) name=(name) class="rich-source" { (escaped(value)) }
    }
}

fn news_form(mode: FormMode, draft: &ArticleDraft, error: Option<&str>) -> Markup {
    html! {
        div id="form-container" {
            h2 id="form-title" { (mode.heading()) }
            @if let Some(error) = error {
                p class="error" { (escaped(error)) }
            }
            form id="news-form" method="post" action="/admin/save" enctype="multipart/form-data" {
                input type="hidden" id="news-id" name="id" value=[mode.id()];
                label for="title" { "Título" }
                input type="text" id="title" name="title" value=(escaped(&draft.title)) required;
                (rich_field("encabezado", "Encabezado", "Escribe el encabezado...", &draft.encabezado))
                (rich_field("description", "Descripción", "Escribe el cuerpo de la noticia...", &draft.description))
                input type="hidden" id="image_url" name="image_url" value=(escaped(&draft.image_url));
                label for="image_file" { "Imagen" }
                input type="file" id="image_file" name="image_file" accept="image/*";
                @if draft.image_url.is_empty() {
                    img id="image-preview" style="display:none;";
                } @else {
                    img id="image-preview" src=(escaped(&draft.image_url)) style="display:block;";
                }
                label {
                    input type="checkbox" id="is_featured" name="is_featured" checked[draft.is_featured];
                    " Destacada"
                }
                label {
                    input type="checkbox" id="is_photo_of_week" name="is_photo_of_week" checked[draft.is_photo_of_week];
                    " Foto de la semana"
                }
                div class="form-actions" {
                    button type="submit" { "Guardar" }
                    a id="btn-cancel" href="/admin" { "Cancelar" }
                }
            }
        }
    }
}

pub fn render_admin(
    site_name: &str,
    table: &Widget<Vec<Article>>,
    form: &AdminForm,
    banner: Option<&str>,
) -> Markup {
    let title = format!("Panel de administración | {site_name}");

    // Solo un formulario abierto se pinta; en envío o cerrado no hay nada que mostrar
    let open_form = match form {
        AdminForm::Open { mode, draft, error } => Some(news_form(*mode, draft, error.as_deref())),
        _ => None,
    };

    let content = html! {
        header class="admin-header" {
            h1 { "Panel de administración" }
            a id="btn-add" href="/admin/new" { "➕ Agregar noticia" }
        }
        main class="admin-page" {
            @if let Some(banner) = banner {
                p class="error" { (escaped(banner)) }
            }
            @if let Some(open_form) = open_form {
                (open_form)
            }
            (news_table(table))
        }
    };

    let head = Head {
        title: &title,
        description: None,
        extra_styles: &[QUILL_CSS],
        scripts: &[QUILL_JS, EDITOR_JS],
    };
    base_document(head, "admin", content)
}
