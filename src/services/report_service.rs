// src/services/report_service.rs

use genpdf::{Element, elements, style};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ScenarioRepository,
    engine,
    models::result::{PricingResult, TaxDetail},
    models::scenario::Scenario,
};

#[derive(Clone)]
pub struct ReportService {
    repo: ScenarioRepository,
}

impl ReportService {
    pub fn new(repo: ScenarioRepository) -> Self {
        Self { repo }
    }

    /// Gera o PDF da proposta: identificação do cenário, postos por lote,
    /// despesas e o resumo da formação de preço (subtotal, CITL, total).
    pub async fn generate_proposal_pdf(&self, scenario_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados e recalcula (o resultado nunca é persistido)
        let scenario = self.repo.load(scenario_id).await?;
        let result = engine::preview_v3(&scenario)?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Proposta - {}", scenario.name));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        self.push_header(&mut doc, &scenario);
        self.push_posts_table(&mut doc, &result)?;
        self.push_summary(&mut doc, &result)?;

        // 3. Renderiza em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::PdfError(e.to_string()))?;
        Ok(buffer)
    }

    /// Gera a planilha Excel de custos e formação de preços: parâmetros,
    /// detalhamento por posto, resumo financeiro e o bloco de CITL/BDI.
    pub async fn generate_proposal_xlsx(&self, scenario_id: Uuid) -> Result<Vec<u8>, AppError> {
        let scenario = self.repo.load(scenario_id).await?;
        let result = engine::preview_v3(&scenario)?;

        build_cost_workbook(&scenario, &result).map_err(|e| AppError::SpreadsheetError(e.to_string()))
    }

    fn push_header(&self, doc: &mut genpdf::Document, scenario: &Scenario) {
        doc.push(
            elements::Paragraph::new("PROPOSTA DE PREÇOS - SERVIÇOS CONTINUADOS")
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Break::new(1.0));
        doc.push(
            elements::Paragraph::new(format!("Cenário: {}", scenario.name))
                .styled(style::Style::new().with_font_size(12)),
        );
        if let Some(tipo) = &scenario.service_type {
            doc.push(elements::Paragraph::new(format!("Tipo de serviço: {}", tipo)));
        }
        doc.push(elements::Break::new(1.5));
    }

    fn push_posts_table(
        &self,
        doc: &mut genpdf::Document,
        result: &PricingResult,
    ) -> Result<(), AppError> {
        doc.push(
            elements::Paragraph::new("Postos de trabalho")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Break::new(0.5));

        // Pesos das colunas: Cargo (4), Lote (1), Qtd (1), Unitário (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Cargo").styled(style_bold))
            .element(elements::Paragraph::new("Lote").styled(style_bold))
            .element(elements::Paragraph::new("Qtd").styled(style_bold))
            .element(elements::Paragraph::new("Unitário").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        for post in &result.labor.posts {
            table
                .row()
                .element(elements::Paragraph::new(post.role.clone()))
                .element(elements::Paragraph::new(post.lot_number.to_string()))
                .element(elements::Paragraph::new(post.headcount.to_string()))
                .element(elements::Paragraph::new(format!("R$ {:.2}", post.unit_total)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", post.total)))
                .push()
                .map_err(|e| AppError::PdfError(e.to_string()))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(1.5));
        Ok(())
    }

    fn push_summary(
        &self,
        doc: &mut genpdf::Document,
        result: &PricingResult,
    ) -> Result<(), AppError> {
        doc.push(
            elements::Paragraph::new("Formação do preço")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Break::new(0.5));

        let mut table = elements::TableLayout::new(vec![4, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let mut linha = |label: String, valor: String| {
            table
                .row()
                .element(elements::Paragraph::new(label))
                .element(elements::Paragraph::new(valor))
                .push()
                .map_err(|e| AppError::PdfError(e.to_string()))
        };

        linha("Remuneração".into(), format!("R$ {:.2}", result.labor.remuneration))?;
        linha("Encargos".into(), format!("R$ {:.2}", result.labor.payroll_charges))?;
        linha("Provisões".into(), format!("R$ {:.2}", result.labor.provisions))?;
        linha("Reposição".into(), format!("R$ {:.2}", result.labor.replacement_reserve))?;
        linha("Insumos".into(), format!("R$ {:.2}", result.labor.supplies))?;
        if result.expenses.total > rust_decimal::Decimal::ZERO {
            linha("Despesas diversas".into(), format!("R$ {:.2}", result.expenses.total))?;
        }
        linha("Subtotal".into(), format!("R$ {:.2}", result.subtotal_before_markup))?;
        linha("Custos indiretos".into(), format!("R$ {:.2}", result.markup.indirect_costs))?;
        match &result.markup.taxes {
            TaxDetail::Simples { rate, amount } => {
                linha(format!("Tributos (Simples {:.2}%)", rate), format!("R$ {:.2}", amount))?;
            }
            TaxDetail::Itemized { pis, cofins, iss } => {
                linha("PIS".into(), format!("R$ {:.2}", pis))?;
                linha("COFINS".into(), format!("R$ {:.2}", cofins))?;
                linha("ISS".into(), format!("R$ {:.2}", iss))?;
            }
        }
        linha("Lucro".into(), format!("R$ {:.2}", result.markup.profit))?;

        doc.push(table);
        doc.push(elements::Break::new(1.0));
        doc.push(
            elements::Paragraph::new(format!("VALOR TOTAL: R$ {:.2}", result.grand_total))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        Ok(())
    }
}

fn money(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn write_money_row(
    sheet: &mut Worksheet,
    row: u32,
    label: &str,
    value: rust_decimal::Decimal,
    rotulo: &Format,
    moeda: &Format,
) -> Result<(), XlsxError> {
    sheet.write_string_with_format(row, 0, label, rotulo)?;
    sheet.write_number_with_format(row, 1, money(value), moeda)?;
    Ok(())
}

/// Monta a planilha de custos em memória a partir do cenário e do resultado
/// já calculado. Mesmas seções da proposta: parâmetros, detalhamento por
/// posto, despesas diversas, resumo financeiro e CITL/BDI.
fn build_cost_workbook(scenario: &Scenario, result: &PricingResult) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Planilha de Custos")?;

    let titulo = Format::new().set_bold().set_font_size(14);
    let subtitulo = Format::new().set_bold().set_font_size(12);
    let rotulo = Format::new().set_bold();
    let cabecalho = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4));
    let moeda = Format::new().set_num_format("R$ #,##0.00");
    let destaque = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4));
    let destaque_moeda = Format::new()
        .set_bold()
        .set_num_format("R$ #,##0.00")
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x4472C4));

    sheet.merge_range(0, 0, 0, 9, "PLANILHA DE CUSTOS E FORMAÇÃO DE PREÇOS", &titulo)?;
    let mut row: u32 = 2;

    sheet.write_string_with_format(row, 0, "Cenário:", &rotulo)?;
    sheet.write_string(row, 1, &scenario.name)?;
    row += 1;
    if let Some(tipo) = &scenario.service_type {
        sheet.write_string_with_format(row, 0, "Tipo de Serviço:", &rotulo)?;
        sheet.write_string(row, 1, tipo)?;
        row += 1;
    }
    row += 1;

    // --- Parâmetros utilizados ---
    sheet.write_string_with_format(row, 0, "PARÂMETROS UTILIZADOS", &subtitulo)?;
    row += 1;
    let p = &scenario.params;
    let regime = match p.regime_tributario {
        crate::models::TaxRegime::Simples => "Simples Nacional",
        crate::models::TaxRegime::LucroPresumido => "Lucro Presumido",
        crate::models::TaxRegime::Outro => "Outro",
    };
    sheet.write_string_with_format(row, 0, "Regime Tributário:", &rotulo)?;
    sheet.write_string(row, 1, regime)?;
    row += 1;
    let percentuais = [
        ("INSS Patronal (%)", p.inss_patronal),
        ("Salário Educação (%)", p.salario_educacao),
        ("RAT/SAT (%)", p.rat_sat),
        ("FAP", p.fap_multiplicador),
        ("FGTS (%)", p.fgts),
        ("Custos Indiretos (%)", p.custos_indiretos_percentual),
        ("Lucro (%)", p.lucro_percentual),
    ];
    for (label, valor) in percentuais {
        sheet.write_string_with_format(row, 0, label, &rotulo)?;
        sheet.write_number(row, 1, money(valor))?;
        row += 1;
    }
    row += 1;

    // --- Detalhamento por posto ---
    sheet.write_string_with_format(row, 0, "DETALHAMENTO POR POSTO", &subtitulo)?;
    row += 1;
    let colunas = [
        "Lote", "Cargo", "Qtd", "Remuneração", "Encargos", "Provisões",
        "Reposição", "Insumos", "Unitário", "Total",
    ];
    for (col, nome) in colunas.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *nome, &cabecalho)?;
    }
    row += 1;
    for post in &result.labor.posts {
        sheet.write_number(row, 0, f64::from(post.lot_number))?;
        sheet.write_string(row, 1, &post.role)?;
        sheet.write_number(row, 2, f64::from(post.headcount))?;
        sheet.write_number_with_format(row, 3, money(post.remuneration), &moeda)?;
        sheet.write_number_with_format(row, 4, money(post.payroll_charges), &moeda)?;
        sheet.write_number_with_format(row, 5, money(post.provisions), &moeda)?;
        sheet.write_number_with_format(row, 6, money(post.replacement_reserve), &moeda)?;
        sheet.write_number_with_format(row, 7, money(post.supplies), &moeda)?;
        sheet.write_number_with_format(row, 8, money(post.unit_total), &moeda)?;
        sheet.write_number_with_format(row, 9, money(post.total), &moeda)?;
        row += 1;
    }
    row += 1;

    // --- Despesas diversas ---
    if !result.expenses.groups.is_empty() {
        sheet.write_string_with_format(row, 0, "DESPESAS DIVERSAS", &subtitulo)?;
        row += 1;
        for group in &result.expenses.groups {
            for item in &group.items {
                sheet.write_number(row, 0, f64::from(group.lot_number))?;
                sheet.write_string(row, 1, &item.description)?;
                sheet.write_number(row, 2, money(item.quantity))?;
                sheet.write_number_with_format(row, 3, money(item.unit_value), &moeda)?;
                sheet.write_number_with_format(row, 4, money(item.total), &moeda)?;
                row += 1;
            }
        }
        write_money_row(sheet, row, "Total de Despesas", result.expenses.total, &rotulo, &moeda)?;
        row += 2;
    }

    // --- Resumo financeiro ---
    sheet.write_string_with_format(row, 0, "RESUMO FINANCEIRO", &subtitulo)?;
    row += 1;
    write_money_row(sheet, row, "Remuneração Total", result.labor.remuneration, &rotulo, &moeda)?;
    row += 1;
    write_money_row(sheet, row, "Encargos", result.labor.payroll_charges, &rotulo, &moeda)?;
    row += 1;
    write_money_row(sheet, row, "Provisões", result.labor.provisions, &rotulo, &moeda)?;
    row += 1;
    write_money_row(sheet, row, "Reposição", result.labor.replacement_reserve, &rotulo, &moeda)?;
    row += 1;
    write_money_row(sheet, row, "Insumos", result.labor.supplies, &rotulo, &moeda)?;
    row += 1;
    write_money_row(
        sheet,
        row,
        "SUBTOTAL (antes do CITL)",
        result.subtotal_before_markup,
        &rotulo,
        &moeda,
    )?;
    row += 2;

    // --- CITL / BDI ---
    sheet.write_string_with_format(row, 0, "CITL / BDI", &subtitulo)?;
    row += 1;
    write_money_row(sheet, row, "Custos Indiretos", result.markup.indirect_costs, &rotulo, &moeda)?;
    row += 1;
    match &result.markup.taxes {
        TaxDetail::Simples { rate, amount } => {
            let label = format!("Tributos (Simples {:.2}%)", rate);
            write_money_row(sheet, row, &label, *amount, &rotulo, &moeda)?;
            row += 1;
        }
        TaxDetail::Itemized { pis, cofins, iss } => {
            write_money_row(sheet, row, "PIS", *pis, &rotulo, &moeda)?;
            row += 1;
            write_money_row(sheet, row, "COFINS", *cofins, &rotulo, &moeda)?;
            row += 1;
            write_money_row(sheet, row, "ISS", *iss, &rotulo, &moeda)?;
            row += 1;
        }
    }
    write_money_row(sheet, row, "Lucro", result.markup.profit, &rotulo, &moeda)?;
    row += 2;

    sheet.write_string_with_format(row, 0, "VALOR TOTAL DA PROPOSTA", &destaque)?;
    sheet.write_number_with_format(row, 1, money(result.grand_total), &destaque_moeda)?;

    sheet.set_column_width(0, 32)?;
    for col in 1..10u16 {
        sheet.set_column_width(col, 15)?;
    }

    workbook.save_to_buffer()
}
