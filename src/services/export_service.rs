use rust_xlsxwriter::*;

use crate::error::Result;
use crate::models::job::Job;

pub struct ExportService;

impl ExportService {
    /// Renders a printable one-sheet summary of a job, entirely in-process.
    pub fn generate_job_summary_xlsx(job: &Job) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Vaga")?;

        let header_bg = Color::RGB(0x0F172A);
        let label_bg = Color::RGB(0xF8FAFC);
        let border_color = Color::RGB(0xE2E8F0);

        worksheet.set_column_width(0, 28.0)?;
        worksheet.set_column_width(1, 64.0)?;

        let title_format = Format::new()
            .set_font_size(14)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 32)?;
        worksheet.merge_range(0, 0, 0, 1, &format!("Resumo da Vaga: {}", job.title), &title_format)?;

        let label_format = Format::new()
            .set_bold()
            .set_background_color(label_bg)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let value_format = Format::new()
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let location = match (&job.city, &job.state) {
            (Some(city), Some(state)) => format!("{} / {}", city, state),
            (Some(city), None) => city.clone(),
            (None, Some(state)) => state.clone(),
            (None, None) => String::new(),
        };

        let rows: Vec<(&str, String)> = vec![
            ("Título", job.title.clone()),
            ("Departamento", job.department.clone().unwrap_or_default()),
            ("Localidade", location),
            ("Tipo de contratação", job.employment_type.clone().unwrap_or_default()),
            ("Carga horária", job.workload.clone().unwrap_or_default()),
            ("Descrição", job.description.clone().unwrap_or_default()),
            ("Requisitos", job.requirements.join("\n")),
            ("Benefícios", job.benefits.join("\n")),
            ("Vagas", job.quantity.to_string()),
            ("Vagas preenchidas", job.quantity_filled.to_string()),
            (
                "Expira em",
                job.expires_at
                    .map(|d| d.format("%d/%m/%Y").to_string())
                    .unwrap_or_default(),
            ),
            ("Situação", job.flow_status.to_string()),
            ("Aprovação", job.approval_status.to_string()),
            (
                "Solicitante",
                job.solicitante_nome.clone().unwrap_or_default(),
            ),
        ];

        for (i, (label, value)) in rows.iter().enumerate() {
            let row = (i + 2) as u32;
            worksheet.write_with_format(row, 0, *label, &label_format)?;
            worksheet.write_with_format(row, 1, value.as_str(), &value_format)?;
        }

        let bytes = workbook.save_to_buffer()?;
        Ok(bytes)
    }
}
