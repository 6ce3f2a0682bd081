use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info};

use super::upload::read_image_field;
use crate::{
    error::UploadError,
    images::ImageUpload,
    models::article::NewsFilter,
    render::{admin::render_admin, Widget},
    state::AppState,
    view::{AdminForm, ArticleDraft},
};

const ADMIN_PATH: &str = "/admin";

// Vuelve a cargar la tabla y pinta el panel con el formulario en el estado dado
async fn admin_page(
    state: &AppState,
    form: &AdminForm,
    banner: Option<&str>,
    status: StatusCode,
) -> Response {
    let table = Widget::from_result(
        state.store.list_news(&NewsFilter::default()).await,
        "noticias del panel",
    );

    let html = render_admin(&state.config.site_name, &table, form, banner);
    (status, html).into_response()
}

// GET /admin (también es el destino de "Cancelar")
pub async fn admin_handler(State(state): State<AppState>) -> Response {
    admin_page(&state, &AdminForm::Closed, None, StatusCode::OK).await
}

// GET /admin/new
pub async fn new_news_handler(State(state): State<AppState>) -> Response {
    admin_page(&state, &AdminForm::add(), None, StatusCode::OK).await
}

// GET /admin/edit/:id
pub async fn edit_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = super::parse_id(&id) else {
        return admin_page(&state, &AdminForm::Closed, Some("ID inválido"), StatusCode::BAD_REQUEST)
            .await;
    };

    match state.store.get_news(id).await {
        Ok(Some(article)) => {
            admin_page(&state, &AdminForm::edit(&article), None, StatusCode::OK).await
        }
        Ok(None) => {
            let banner = format!("Error al obtener noticia {id}: no existe");
            admin_page(&state, &AdminForm::Closed, Some(&banner), StatusCode::NOT_FOUND).await
        }
        Err(e) => {
            error!("❌ Error obteniendo noticia {id}: {e}");
            let banner = format!("Error al obtener noticia: {e}");
            admin_page(&state, &AdminForm::Closed, Some(&banner), StatusCode::INTERNAL_SERVER_ERROR)
                .await
        }
    }
}

// Lo que trae el formulario multipart del panel
#[derive(Debug, Default)]
struct Submission {
    id: Option<i64>,
    draft: ArticleDraft,
    image: Option<ImageUpload>,
    // Primer problema al leer el formulario; el resto de los campos se lee igual
    error: Option<UploadError>,
}

fn is_checked(value: &str) -> bool {
    matches!(value, "on" | "true" | "1")
}

async fn read_submission(multipart: Result<Multipart, MultipartRejection>) -> Submission {
    let mut submission = Submission::default();

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            submission.error = Some(UploadError::Unreadable(e.body_text()));
            return submission;
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                submission.error.get_or_insert(UploadError::Unreadable(e.to_string()));
                break;
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == "image_file" {
            match read_image_field(field).await {
                Ok(image) => submission.image = image,
                Err(e) => {
                    submission.error.get_or_insert(e);
                }
            }
            continue;
        }

        let value = match field.text().await {
            Ok(value) => value,
            Err(e) => {
                submission.error.get_or_insert(UploadError::Unreadable(e.to_string()));
                continue;
            }
        };

        let draft = &mut submission.draft;
        match name.as_str() {
            "id" => submission.id = value.trim().parse::<i64>().ok().filter(|id| *id > 0),
            "title" => draft.title = value,
            "encabezado" => draft.encabezado = value,
            "description" => draft.description = value,
            "image_url" => draft.image_url = value,
            "is_featured" => draft.is_featured = is_checked(&value),
            "is_photo_of_week" => draft.is_photo_of_week = is_checked(&value),
            _ => {}
        }
    }

    submission
}

// POST /admin/save: subir imagen (si hay), luego crear o actualizar
pub async fn save_news_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let submission = read_submission(multipart).await;

    let form = AdminForm::posted(submission.id, submission.draft);
    let mut form = match form.submit() {
        Ok(form) => form,
        Err(form) => return admin_page(&state, &form, None, StatusCode::BAD_REQUEST).await,
    };

    if let Some(e) = submission.error {
        let status = e.status();
        let form = form.fail(format!("No se pudo subir la imagen: {e}"));
        return admin_page(&state, &form, None, status).await;
    }

    // Si la subida falla, no se guarda nada y el formulario sigue abierto
    if let Some(image) = submission.image {
        match state.images.upload(image).await {
            Ok(uploaded) => {
                info!("✅ Imagen subida: {}", uploaded.url);
                form.use_uploaded_image(&uploaded.url);
            }
            Err(e) => {
                error!("❌ Error subiendo imagen: {e}");
                let form = form.fail(format!("No se pudo subir la imagen: {e}"));
                return admin_page(&state, &form, None, StatusCode::INTERNAL_SERVER_ERROR).await;
            }
        }
    }

    let (Some(mode), Some(draft)) = (form.mode(), form.draft()) else {
        return admin_page(&state, &form, None, StatusCode::BAD_REQUEST).await;
    };
    let input = draft.to_input();

    let saved = match mode.id() {
        Some(id) => state.store.update_news(id, &input).await.map(|row| row.is_some()),
        None => state.store.create_news(&input).await.map(|_| true),
    };
    let action = if mode.id().is_some() { "actualizar" } else { "crear" };

    let (form, status) = match saved {
        Ok(true) => {
            info!("✅ Noticia guardada ({action})");
            (form.succeed(), StatusCode::OK)
        }
        Ok(false) => (
            form.fail(format!("Error al {action} noticia: no existe")),
            StatusCode::NOT_FOUND,
        ),
        Err(e) => {
            error!("❌ Error al {action} noticia: {e}");
            (
                form.fail(format!("Error al {action} noticia: {e}")),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };

    // Formulario cerrado = guardado; si sigue abierto, se muestra con el error
    match form {
        AdminForm::Closed => Redirect::to(ADMIN_PATH).into_response(),
        open => admin_page(&state, &open, None, status).await,
    }
}

// POST /admin/delete/:id (el navegador pide confirmación antes)
pub async fn delete_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = super::parse_id(&id) else {
        return admin_page(&state, &AdminForm::Closed, Some("ID inválido"), StatusCode::BAD_REQUEST)
            .await;
    };

    match state.store.delete_news(id).await {
        Ok(Some(_)) => Redirect::to(ADMIN_PATH).into_response(),
        Ok(None) => {
            let banner = format!("Error al eliminar noticia {id}: no existe");
            admin_page(&state, &AdminForm::Closed, Some(&banner), StatusCode::NOT_FOUND).await
        }
        Err(e) => {
            error!("❌ Error eliminando noticia {id}: {e}");
            let banner = format!("Error al eliminar noticia: {e}");
            admin_page(&state, &AdminForm::Closed, Some(&banner), StatusCode::INTERNAL_SERVER_ERROR)
                .await
        }
    }
}
